//! Chart header: title, unit and a live/offline marker.

use crate::state::{AppState, RefreshStatus};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// Unit of the y values (e.g., "millimetres (mm)")
    #[props(default = String::new())]
    pub unit_description: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    let state = use_context::<AppState>();
    let live = !matches!(*state.status.read(), RefreshStatus::Connecting);
    let refreshes = (state.refresh_count)();
    let dot = if live { "#43A047" } else { "#BDBDBD" };

    rsx! {
        div {
            style: "display: flex; justify-content: space-between; align-items: baseline; margin-bottom: 8px;",
            div {
                h3 {
                    style: "margin: 0 0 4px 0; font-size: 16px;",
                    "{props.title}"
                }
                if !props.unit_description.is_empty() {
                    p {
                        style: "margin: 0; font-size: 12px; color: #666;",
                        "Rainfall in {props.unit_description}"
                    }
                }
            }
            span {
                style: "font-size: 12px; color: #666;",
                span { style: "color: {dot};", "● " }
                if live { "live, {refreshes} updates" } else { "offline" }
            }
        }
    }
}
