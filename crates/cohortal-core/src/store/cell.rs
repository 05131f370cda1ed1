// ── Observable resource cell ──
//
// One canonical "current value" per remote resource, broadcast to
// subscribers via a `watch` channel. `None` is the uninitialized
// sentinel; a failed refresh never writes to the cell, so subscribers
// keep observing the last good value.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Holder of the last-known value of one remote resource.
///
/// Subscribing never performs I/O; whoever owns the cell decides when to
/// fetch and publish. Every `publish` is a broadcast: all current and
/// future subscribers observe the same value, and a subscriber attaching
/// after the first successful publish immediately sees the latest value
/// (replay-one semantics).
pub struct ResourceCell<T> {
    value: watch::Sender<Option<Arc<T>>>,
}

impl<T: Send + Sync + 'static> ResourceCell<T> {
    pub fn new() -> Self {
        let (value, _) = watch::channel(None);
        Self { value }
    }

    /// Store a new value and broadcast it. Returns the shared handle so
    /// callers can hand the stored value straight back to their caller.
    pub fn publish(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let shared = Arc::clone(&value);
        // `send_modify` updates unconditionally, even with zero receivers.
        self.value.send_modify(|current| *current = Some(value));
        shared
    }

    /// Reset to the uninitialized state. Only logout-style flows call
    /// this; fetch failures leave the cell untouched.
    pub fn clear(&self) {
        self.value.send_modify(|current| *current = None);
    }

    /// The current value, if the resource has ever loaded.
    pub fn current(&self) -> Option<Arc<T>> {
        self.value.borrow().clone()
    }

    /// Subscribe to current and future values.
    pub fn subscribe(&self) -> ResourceStream<T> {
        ResourceStream::new(self.value.subscribe())
    }
}

impl<T: Send + Sync + 'static> Default for ResourceCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A subscription to a [`ResourceCell`].
///
/// Provides both point-in-time access and reactive change notification
/// via `changed()` or by converting into a `Stream`.
pub struct ResourceStream<T> {
    current: Option<Arc<T>>,
    receiver: watch::Receiver<Option<Arc<T>>>,
}

impl<T: Send + Sync + 'static> ResourceStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Option<Arc<T>>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The value captured at subscription time (replay-one).
    pub fn current(&self) -> Option<&Arc<T>> {
        self.current.as_ref()
    }

    /// The latest value (may have changed since subscription).
    pub fn latest(&self) -> Option<Arc<T>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new state.
    /// Returns `None` if the owning cell has been dropped.
    pub async fn changed(&mut self) -> Option<Option<Arc<T>>> {
        self.receiver.changed().await.ok()?;
        let state = self.receiver.borrow_and_update().clone();
        self.current.clone_from(&state);
        Some(state)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> ResourceWatchStream<T> {
        ResourceWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields the current state on first poll, then a new state each time
/// the underlying cell is mutated.
pub struct ResourceWatchStream<T> {
    inner: WatchStream<Option<Arc<T>>>,
}

impl<T: Send + Sync + 'static> Stream for ResourceWatchStream<T> {
    type Item = Option<Arc<T>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // WatchStream is Unpin when the item type is Unpin, which
        // Option<Arc<T>> always is.
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        let cell: ResourceCell<u32> = ResourceCell::new();
        assert!(cell.current().is_none());
        assert!(cell.subscribe().current().is_none());
    }

    #[test]
    fn late_subscriber_replays_latest_value() {
        let cell: ResourceCell<u32> = ResourceCell::new();
        cell.publish(1);
        cell.publish(2);

        let sub = cell.subscribe();
        assert_eq!(sub.current().map(|v| **v), Some(2));
    }

    #[test]
    fn publish_returns_the_stored_handle() {
        let cell: ResourceCell<String> = ResourceCell::new();
        let stored = cell.publish("hello".to_owned());
        assert_eq!(*stored, "hello");
        assert_eq!(cell.current().unwrap(), stored);
    }

    #[test]
    fn clear_resets_to_uninitialized() {
        let cell: ResourceCell<u32> = ResourceCell::new();
        cell.publish(7);
        cell.clear();
        assert!(cell.current().is_none());
    }

    #[tokio::test]
    async fn changed_observes_later_publishes() {
        let cell: ResourceCell<u32> = ResourceCell::new();
        let mut sub = cell.subscribe();
        assert!(sub.current().is_none());

        cell.publish(5);
        let state = sub.changed().await.unwrap();
        assert_eq!(state.map(|v| *v), Some(5));
        assert_eq!(sub.current().map(|v| **v), Some(5));
    }

    #[tokio::test]
    async fn all_subscribers_observe_the_same_broadcast() {
        let cell: ResourceCell<u32> = ResourceCell::new();
        let mut early = cell.subscribe();

        cell.publish(9);
        let from_early = early.changed().await.unwrap();
        let late = cell.subscribe();

        assert_eq!(from_early.map(|v| *v), Some(9));
        assert_eq!(late.current().map(|v| **v), Some(9));
    }

    #[tokio::test]
    async fn changed_returns_none_when_cell_dropped() {
        let cell: ResourceCell<u32> = ResourceCell::new();
        let mut sub = cell.subscribe();
        drop(cell);
        assert!(sub.changed().await.is_none());
    }
}
