//! Rainfall CLI - Command line tool for inspecting rainfall prediction data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "rainfall-cli",
    version,
    about = "Rainfall prediction chart toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: rainfall_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("rainfall-cli {}", env!("CARGO_PKG_VERSION"));
    rainfall_cmd::run(cli.command).await
}
