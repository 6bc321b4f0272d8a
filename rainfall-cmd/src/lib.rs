//! Command implementations for the rainfall CLI.
//!
//! Runs the same refresh cycle as the browser chart against a live
//! prediction server, printing the series instead of drawing it.

use clap::Subcommand;
use rainfall_core::config::PREDICTION_DATA_PATH;
use rainfall_core::series::DateStyle;

pub mod classify;
pub mod fetch;

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the prediction series once and print the chart points
    Fetch {
        /// Server origin the chart page is served from
        #[arg(short = 'u', long, default_value = "http://127.0.0.1:5000")]
        base_url: String,

        /// Prediction data path on the server
        #[arg(short = 'p', long, default_value = PREDICTION_DATA_PATH)]
        path: String,

        /// Date label layout: mdy, dmy or iso
        #[arg(short = 'd', long, default_value = "mdy")]
        date_style: DateStyle,

        /// Print the Plotly data/layout JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Classify rainfall amounts (mm) into weather conditions
    Classify {
        /// One or more predicted rainfall amounts
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch {
            base_url,
            path,
            date_style,
            json,
        } => fetch::run_fetch(&base_url, &path, date_style, json).await,
        Command::Classify { values } => {
            classify::run_classify(&values);
            Ok(())
        }
    }
}
