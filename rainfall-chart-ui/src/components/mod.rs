//! Reusable Dioxus RSX components for the rainfall chart app.

mod chart_container;
mod chart_header;
mod condition_badge;
mod error_display;
mod status_indicator;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use condition_badge::ConditionBadge;
pub use error_display::ErrorDisplay;
pub use status_indicator::StatusIndicator;
