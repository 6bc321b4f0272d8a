//! Badge naming the rainfall condition of the newest prediction.

use dioxus::prelude::*;
use rainfall_core::condition::{normalize_prediction, RainfallCondition};

#[derive(Props, Clone, PartialEq)]
pub struct ConditionBadgeProps {
    /// Latest predicted rainfall (mm)
    pub value: f64,
}

#[component]
pub fn ConditionBadge(props: ConditionBadgeProps) -> Element {
    let condition = RainfallCondition::classify(props.value);
    let value = format!("{:.2}", normalize_prediction(props.value));
    let icon = condition.icon();

    rsx! {
        span {
            class: "condition-badge condition-{icon}",
            title: "{icon}",
            style: "display: inline-block; padding: 2px 8px; border-radius: 10px; background: #E3F2FD; color: #1565C0; font-size: 12px;",
            "{condition} ({value} mm)"
        }
    }
}
