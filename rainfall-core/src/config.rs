//! Fixed endpoints, names and chart labels for the live chart.
//!
//! Everything has a sensible default matching the prediction server; the
//! structs derive `Deserialize` so a host page can override them with JSON.

use serde::{Deserialize, Serialize};

/// DOM id of the element the chart is drawn into.
pub const CHART_ELEMENT_ID: &str = "chart";

/// Path (relative to the page origin) serving the prediction series.
pub const PREDICTION_DATA_PATH: &str = "/get_prediction_data";

/// Push-channel event that triggers a refresh.
pub const UPDATE_EVENT: &str = "update";

/// Titles and colours used when drawing the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLabels {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub line_color: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            title: "Daily Rainfall Chart".to_string(),
            x_axis: "Date".to_string(),
            y_axis: "Rainfall".to_string(),
            line_color: "blue".to_string(),
        }
    }
}

/// Settings for one live chart updater.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// DOM id of the chart target.
    pub target_element: String,
    /// Path of the JSON prediction endpoint.
    pub data_path: String,
    /// Name of the push event that triggers a refresh.
    pub event: String,
    pub labels: ChartLabels,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            target_element: CHART_ELEMENT_ID.to_string(),
            data_path: PREDICTION_DATA_PATH.to_string(),
            event: UPDATE_EVENT.to_string(),
            labels: ChartLabels::default(),
        }
    }
}

impl UpdaterConfig {
    /// Parse a (possibly partial) JSON override; missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
