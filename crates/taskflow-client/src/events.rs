//! Tasks-changed Broadcast
//!
//! The chat panel announces that the assistant touched tasks; the task list
//! listens and refetches. Delivery is at-least-once per live subscriber with
//! no ordering relative to task requests already in flight.

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::Stream;
use tracing::debug;

/// "The server-side task collection may have changed"; carries no payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TasksChanged;

/// Fan-out channel for [`TasksChanged`]
///
/// Clones share the subscriber list.
#[derive(Debug, Clone, Default)]
pub struct TaskEvents {
    subscribers: Arc<Mutex<Vec<UnboundedSender<TasksChanged>>>>,
}

impl TaskEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving notifications. Dropping the subscription unsubscribes.
    pub fn subscribe(&self) -> TaskEventsSubscription {
        let (tx, rx) = unbounded();
        self.lock().push(tx);
        TaskEventsSubscription { rx }
    }

    /// Deliver one event to every live subscriber; returns how many got it
    pub fn notify(&self) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|tx| tx.unbounded_send(TasksChanged).is_ok());
        debug!(subscribers = subscribers.len(), "tasks changed");
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<UnboundedSender<TasksChanged>>> {
        self.subscribers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Receiving end of [`TaskEvents`]
#[derive(Debug)]
pub struct TaskEventsSubscription {
    rx: UnboundedReceiver<TasksChanged>,
}

impl TaskEventsSubscription {
    /// Drain events that already arrived without waiting; returns the count
    pub fn drain_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(Some(_)) = self.rx.try_next() {
            count += 1;
        }
        count
    }
}

impl Stream for TaskEventsSubscription {
    type Item = TasksChanged;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}
