//! Shared Dioxus components and browser bindings for the rainfall chart app.
//!
//! This crate provides:
//! - `js_bridge`: Plotly.js wrappers via `js_sys::eval()` and the `PlotlyRenderer`
//! - `push`: Socket.IO push channel feeding a notification queue
//! - `http`: `fetch`-backed prediction source
//! - `locale`: date labels in the browser's locale
//! - `page`: updater settings read from the host page
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components

pub mod components;
pub mod http;
pub mod js_bridge;
pub mod locale;
pub mod page;
pub mod push;
pub mod state;
