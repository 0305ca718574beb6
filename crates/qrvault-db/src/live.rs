//! # Live Query Streams
//!
//! Push-based list updates over `tokio::sync::watch`.
//!
//! ## How It Works
//! ```text
//! Repository mutation (append / delete / upsert / ...)
//!      │
//!      ▼  re-query the affected list
//! LiveList::publish(rows)
//!      │
//!      ▼  watch channel stores the latest snapshot
//! every subscriber's `changed().await` resolves; `borrow()` sees the
//! full new list
//! ```
//!
//! A new subscriber immediately observes the current snapshot via
//! `borrow()` - no mutation is needed to get the first value. Watch
//! channels keep only the latest list, so a slow consumer skips
//! intermediate states instead of queueing them.

use tokio::sync::watch;

/// Latest-snapshot broadcast of a queried list.
#[derive(Debug)]
pub struct LiveList<T> {
    tx: watch::Sender<Vec<T>>,
}

impl<T: Clone> LiveList<T> {
    /// Creates a live list whose initial snapshot is empty.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx }
    }

    /// Replaces the snapshot and wakes all subscribers.
    ///
    /// Publishing with zero subscribers is fine; the snapshot is kept for
    /// whoever subscribes next.
    pub fn publish(&self, rows: Vec<T>) {
        self.tx.send_replace(rows);
    }

    /// Subscribes to snapshots. `borrow()` on the receiver yields the
    /// current list immediately.
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Default for LiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_sees_current_snapshot() {
        let live = LiveList::new();
        live.publish(vec![1, 2, 3]);

        let rx = live.subscribe();
        assert_eq!(*rx.borrow(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_publish_wakes_subscribers() {
        let live = LiveList::new();
        let mut rx = live.subscribe();

        live.publish(vec![42]);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), vec![42]);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_kept() {
        let live = LiveList::new();
        live.publish(vec!["a".to_string()]);
        live.publish(vec!["b".to_string()]);

        let rx = live.subscribe();
        assert_eq!(*rx.borrow(), vec!["b".to_string()]);
    }
}
