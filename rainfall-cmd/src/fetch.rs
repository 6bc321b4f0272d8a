//! One-shot refresh against a running prediction server.

use std::time::Duration;

use anyhow::bail;
use log::info;
use rainfall_core::chart::{ChartState, ChartSurface, Renderer};
use rainfall_core::config::ChartLabels;
use rainfall_core::record::{parse_records, PredictionRecord};
use rainfall_core::series::{ChronoLabeler, DateStyle};
use rainfall_core::updater::{LiveChartUpdater, PredictionSource, RefreshOutcome};
use rainfall_core::FetchError;
use reqwest::header::ACCEPT;

/// Chart target name used for terminal output.
const TERMINAL_TARGET: &str = "stdout";

/// Prediction source issuing `GET` requests with reqwest.
pub struct ReqwestPredictionSource {
    client: reqwest::Client,
    url: String,
}

impl ReqwestPredictionSource {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl PredictionSource for ReqwestPredictionSource {
    async fn fetch_latest(&self) -> Result<Vec<PredictionRecord>, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        parse_records(&body)
    }
}

/// Prints redraws to stdout, as a table or as Plotly JSON.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    json: bool,
}

impl TerminalRenderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl Renderer for TerminalRenderer {
    fn init(&mut self, target: &str, _state: &ChartState) {
        log::debug!("terminal chart '{}' ready", target);
    }

    fn replace_data(&mut self, _target: &str, state: &ChartState) {
        if self.json {
            println!("{}", format_json(state));
        } else {
            print!("{}", format_table(state));
        }
    }
}

/// Join a server origin and a path with exactly one slash between them.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `{"data": [...], "layout": {...}}`, the arguments of `Plotly.newPlot`.
pub fn format_json(state: &ChartState) -> String {
    serde_json::json!({
        "data": state.data,
        "layout": state.layout,
    })
    .to_string()
}

/// Two aligned columns, one row per point, under the chart title.
pub fn format_table(state: &ChartState) -> String {
    let mut out = String::new();
    if let Some(title) = &state.layout.title {
        out.push_str(&format!("{}\n", title));
    }
    out.push_str(&format!(
        "{:<12} {:>10}\n",
        state.layout.xaxis.title, state.layout.yaxis.title
    ));
    for trace in &state.data {
        for (x, y) in trace.x.iter().zip(&trace.y) {
            let y = y.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string());
            out.push_str(&format!("{:<12} {:>10}\n", x, y));
        }
    }
    out
}

pub async fn run_fetch(
    base_url: &str,
    path: &str,
    date_style: DateStyle,
    json: bool,
) -> anyhow::Result<()> {
    let url = endpoint_url(base_url, path);
    info!("Fetching prediction series from {}", url);

    let surface = ChartSurface::initialize(
        TerminalRenderer::new(json),
        TERMINAL_TARGET,
        ChartLabels::default(),
    );
    let updater = LiveChartUpdater::with_labeler(
        ReqwestPredictionSource::new(url)?,
        surface,
        Box::new(ChronoLabeler::new(date_style)),
    );

    match updater.refresh().await {
        RefreshOutcome::Applied { points, .. } => {
            info!("Fetched {} predictions", points);
            Ok(())
        }
        RefreshOutcome::Failed { error, .. } => bail!("fetch failed: {}", error),
        RefreshOutcome::Stale { ticket, newest } => {
            bail!("refresh #{} superseded by #{}", ticket, newest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rainfall_core::series::DisplayPoint;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("http://127.0.0.1:5000/", "/get_prediction_data"),
            "http://127.0.0.1:5000/get_prediction_data"
        );
        assert_eq!(
            endpoint_url("http://rain.local", "get_prediction_data"),
            "http://rain.local/get_prediction_data"
        );
    }

    #[test]
    fn test_format_table() {
        let state = ChartState::from_points(
            &[
                DisplayPoint {
                    x: "1/1/2024".to_string(),
                    y: Some(5.2),
                },
                DisplayPoint {
                    x: "Invalid Date".to_string(),
                    y: None,
                },
            ],
            &ChartLabels::default(),
        );
        let table = format_table(&state);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Daily Rainfall Chart");
        assert_eq!(lines[1], "Date           Rainfall");
        assert_eq!(lines[2], "1/1/2024           5.20");
        assert_eq!(lines[3], "Invalid Date          -");
    }

    #[test]
    fn test_format_json_has_plotly_shape() {
        let state = ChartState::from_points(&[], &ChartLabels::default());
        let value: serde_json::Value = serde_json::from_str(&format_json(&state)).unwrap();
        assert_eq!(value["data"][0]["x"], serde_json::json!([]));
        assert_eq!(value["layout"]["title"], "Daily Rainfall Chart");
    }
}
