//! Host element for the Plotly chart.

use crate::state::{AppState, RefreshStatus};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id Plotly draws into
    pub id: String,
    #[props(default = 420)]
    pub min_height: u32,
}

/// Plotly owns the inner div once drawn; Dioxus never renders into it.
/// Until the first update arrives a hint is laid over the empty axes.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let state = use_context::<AppState>();
    let awaiting_data = matches!(
        *state.status.read(),
        RefreshStatus::Connecting | RefreshStatus::Waiting
    );

    rsx! {
        div {
            style: "position: relative; width: 100%; min-height: {props.min_height}px;",
            div {
                id: "{props.id}",
                style: "width: 100%; min-height: {props.min_height}px;",
            }
            if awaiting_data {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #999; pointer-events: none;",
                    "No predictions yet, the chart fills in on the next update."
                }
            }
        }
    }
}
