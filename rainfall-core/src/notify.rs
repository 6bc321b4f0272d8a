//! Push-channel subscription.
//!
//! The browser's push callback only has to call [`PushSubscription::dispatch`];
//! matching notifications land on a queue that the refresh task drains one
//! at a time. Notifications are pure triggers, payloads are never read.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::Stream;

/// One received push event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub event: String,
}

/// Create a subscription to `event` and the queue it feeds.
pub fn subscription(event: impl Into<String>) -> (PushSubscription, NotificationQueue) {
    let (tx, rx) = mpsc::unbounded();
    (
        PushSubscription {
            event: event.into(),
            tx,
        },
        NotificationQueue { rx },
    )
}

/// Sending half, handed to the push channel's event callback.
#[derive(Debug, Clone)]
pub struct PushSubscription {
    event: String,
    tx: UnboundedSender<Notification>,
}

impl PushSubscription {
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Queue a notification if `event` is the subscribed one.
    ///
    /// Returns whether it was queued. Once the queue is gone this is a no-op.
    pub fn dispatch(&self, event: &str) -> bool {
        if event != self.event {
            log::trace!("ignoring push event '{}'", event);
            return false;
        }
        let queued = self
            .tx
            .unbounded_send(Notification {
                event: event.to_string(),
            })
            .is_ok();
        if !queued {
            log::debug!("notification queue closed, dropping '{}'", event);
        }
        queued
    }
}

/// Receiving half: a stream of notifications in arrival order.
#[derive(Debug)]
pub struct NotificationQueue {
    rx: UnboundedReceiver<Notification>,
}

impl Stream for NotificationQueue {
    type Item = Notification;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

/// Address of the push endpoint for a page served from `domain:port`.
///
/// Pages on a default port have an empty `location.port`; no colon is
/// appended then.
pub fn push_endpoint(domain: &str, port: &str) -> String {
    if port.is_empty() {
        format!("http://{domain}")
    } else {
        format!("http://{domain}:{port}")
    }
}
