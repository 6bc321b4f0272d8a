//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use dioxus::prelude::*;
use rainfall_core::updater::RefreshOutcome;

/// What the status indicator shows about the refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshStatus {
    /// Page is up, push channel not yet subscribed.
    Connecting,
    /// Subscribed, no update received yet.
    Waiting,
    /// Chart shows the response of this refresh.
    Updated { ticket: u64, points: usize },
    /// Last refresh failed; chart still shows older data.
    Failed(String),
}

/// Shared application state for the rainfall chart app.
#[derive(Clone, Copy)]
pub struct AppState {
    pub status: Signal<RefreshStatus>,
    /// Rainfall of the newest point on the chart
    pub latest_value: Signal<Option<f64>>,
    /// Number of refreshes received so far
    pub refresh_count: Signal<u64>,
    /// Setup error (push channel could not be opened)
    pub error_msg: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            status: Signal::new(RefreshStatus::Connecting),
            latest_value: Signal::new(None),
            refresh_count: Signal::new(0),
            error_msg: Signal::new(None),
        }
    }

    /// Fold one refresh outcome into the signals.
    ///
    /// Stale responses change nothing on screen, so they are not shown.
    pub fn apply_outcome(&mut self, outcome: &RefreshOutcome) {
        match outcome {
            RefreshOutcome::Applied {
                ticket,
                points,
                latest,
            } => {
                self.status.set(RefreshStatus::Updated {
                    ticket: *ticket,
                    points: *points,
                });
                self.latest_value.set(*latest);
            }
            RefreshOutcome::Failed { error, .. } => {
                self.status.set(RefreshStatus::Failed(error.to_string()));
            }
            RefreshOutcome::Stale { .. } => return,
        }
        *self.refresh_count.write() += 1;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
