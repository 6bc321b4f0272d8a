//! Core types and refresh cycle for the live rainfall prediction chart.
//!
//! This crate is platform-neutral (native and `wasm32-unknown-unknown`):
//! - `record`: server-side prediction rows as they arrive over JSON
//! - `series`: reshaping rows into display points
//! - `chart`: the Plotly-shaped chart model and the `Renderer` seam
//! - `notify`: push-channel subscription feeding a notification queue
//! - `updater`: the fetch -> transform -> redraw cycle
//! - `condition`: rainfall condition classification

pub mod chart;
pub mod condition;
pub mod config;
pub mod error;
pub mod notify;
pub mod record;
pub mod series;
pub mod updater;

pub use error::FetchError;
