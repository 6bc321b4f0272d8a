//! Small status line under the chart.
//!
//! Fetch failures never touch the chart itself; this is the only place
//! they become visible.

use crate::components::ConditionBadge;
use crate::state::{AppState, RefreshStatus};
use dioxus::prelude::*;

#[component]
pub fn StatusIndicator() -> Element {
    let state = use_context::<AppState>();
    let status = state.status.read().clone();
    let latest = (state.latest_value)();

    let (color, text) = match status {
        RefreshStatus::Connecting => ("#666", "Connecting to update channel...".to_string()),
        RefreshStatus::Waiting => ("#666", "Waiting for the next prediction update".to_string()),
        RefreshStatus::Updated { points, .. } => ("#2E7D32", format!("Showing {} predictions", points)),
        RefreshStatus::Failed(reason) => ("#C62828", format!("Last update failed: {}", reason)),
    };

    rsx! {
        div {
            style: "display: flex; gap: 12px; align-items: center; font-size: 12px; margin-top: 4px;",
            span {
                style: "color: {color};",
                "{text}"
            }
            if let Some(value) = latest {
                ConditionBadge { value: value }
            }
        }
    }
}
