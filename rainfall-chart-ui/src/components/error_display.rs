//! Banner for setup problems that stop live updates altogether.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// What the reader can do about it
    #[props(default = "Reload the page to try again.".to_string())]
    pub hint: String,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "padding: 10px 14px; margin: 8px 0; background: #FFF3E0; color: #BF360C; border-left: 4px solid #FB8C00;",
            strong { "Live updates unavailable. " }
            "{props.message} "
            span {
                style: "color: #8D6E63;",
                "{props.hint}"
            }
        }
    }
}
