//! Live Daily Rainfall Prediction Chart
//!
//! Shows the prediction series stored by the forecasting server as a
//! Plotly line chart that redraws whenever the server announces new data.
//!
//! Data flow:
//! 1. On mount: draw an empty chart (axes only) into the `chart` element.
//! 2. Subscribe to the Socket.IO `update` event on the page's own origin.
//! 3. On each `update`: `GET /get_prediction_data`, turn every row into a
//!    (date, rainfall) point and replace the whole chart with them.
//!
//! A failed fetch leaves the chart as it was; the status line says why.

use dioxus::prelude::*;
use rainfall_chart_ui::components::{ChartContainer, ChartHeader, ErrorDisplay, StatusIndicator};
use rainfall_chart_ui::http::HttpPredictionSource;
use rainfall_chart_ui::js_bridge::{self, PlotlyRenderer};
use rainfall_chart_ui::locale::BrowserLocaleLabeler;
use rainfall_chart_ui::page::page_config;
use rainfall_chart_ui::push;
use rainfall_chart_ui::state::{AppState, RefreshStatus};
use rainfall_core::chart::ChartSurface;
use rainfall_core::config::UpdaterConfig;
use rainfall_core::notify;
use rainfall_core::updater::LiveChartUpdater;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("rainfall-root"))
        .launch(App);
}

/// Draw the empty chart, open the push channel and start the refresh task.
fn start_live_chart(config: UpdaterConfig, mut state: AppState) {
    js_bridge::load_libraries();

    let surface = ChartSurface::initialize(
        PlotlyRenderer,
        config.target_element.clone(),
        config.labels.clone(),
    );
    let updater = LiveChartUpdater::with_labeler(
        HttpPredictionSource::new(config.data_path.clone()),
        surface,
        Box::new(BrowserLocaleLabeler::from_navigator()),
    );

    let Some(endpoint) = push::page_push_endpoint() else {
        state
            .error_msg
            .set(Some("Could not determine the page origin for live updates.".to_string()));
        return;
    };
    let (subscription, queue) = notify::subscription(config.event.clone());
    if let Err(err) = push::connect(&endpoint, subscription) {
        log::error!("failed to open push channel: {:?}", err);
        state
            .error_msg
            .set(Some("Could not subscribe to live updates.".to_string()));
        return;
    }
    state.status.set(RefreshStatus::Waiting);

    spawn(async move {
        updater
            .run(queue, |outcome| state.apply_outcome(outcome))
            .await;
    });
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);
    let config = use_hook(page_config);

    // ─── Effect: one-time chart setup and subscription ───
    let setup_config = config.clone();
    use_effect(move || {
        start_live_chart(setup_config.clone(), state);
    });

    let target = config.target_element.clone();
    use_drop(move || js_bridge::purge_chart(&target));

    // ─── Render ───
    rsx! {
        div {
            style: "max-width: 900px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            ChartHeader {
                title: "Rainfall Prediction".to_string(),
                unit_description: "millimetres (mm)".to_string(),
            }

            ChartContainer {
                id: config.target_element.clone(),
                min_height: 450,
            }

            StatusIndicator {}
        }
    }
}
