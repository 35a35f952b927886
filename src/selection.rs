// ABOUTME: Process-wide shared holder of the current combined selectable list
// ABOUTME: Replay-latest broadcast over tokio watch, atomic whole-value updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Selection store
//!
//! Cross-screen shared state: the deduplicated union of current search
//! results and already-selected items, published so independent screens agree
//! on what a given item id currently looks like.
//!
//! Every mutation is a full replacement, which keeps concurrent readers
//! trivially consistent. Readers get the latest value immediately on
//! subscribe and on every subsequent update; there is no queue and no
//! partial-update API.

use crate::models::FoodItem;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Shared, clonable holder of the current combined list
#[derive(Debug, Clone)]
pub struct SelectionStore {
    tx: Arc<watch::Sender<Vec<FoodItem>>>,
}

impl SelectionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx: Arc::new(tx) }
    }

    /// Atomically replace the published list
    pub fn update(&self, items: Vec<FoodItem>) {
        tracing::debug!(count = items.len(), "selection list replaced");
        self.tx.send_replace(items);
    }

    /// Subscribe to the list; the receiver sees the current value right away
    #[must_use]
    pub fn observe(&self) -> watch::Receiver<Vec<FoodItem>> {
        self.tx.subscribe()
    }

    /// Subscribe as a `Stream` yielding the current list and every update
    #[must_use]
    pub fn observe_stream(&self) -> WatchStream<Vec<FoodItem>> {
        WatchStream::new(self.tx.subscribe())
    }

    /// Cheap synchronous copy of the current list
    #[must_use]
    pub fn snapshot(&self) -> Vec<FoodItem> {
        self.tx.borrow().clone()
    }

    /// Look up an item by id in the current list
    #[must_use]
    pub fn find(&self, id: &str) -> Option<FoodItem> {
        self.tx.borrow().iter().find(|item| item.id() == id).cloned()
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodProduct;

    fn item(id: &str) -> FoodItem {
        FoodItem::from(FoodProduct::new(id, id, 100.0, 10.0, 10.0, 10.0))
    }

    #[tokio::test]
    async fn test_observer_sees_latest_immediately() {
        let store = SelectionStore::new();
        store.update(vec![item("a")]);

        let rx = store.observe();
        assert_eq!(rx.borrow().len(), 1);
        assert_eq!(rx.borrow()[0].id(), "a");
    }

    #[tokio::test]
    async fn test_update_replaces_whole_value() {
        let store = SelectionStore::new();
        let mut rx = store.observe();

        store.update(vec![item("a"), item("b")]);
        rx.changed().await.ok();
        assert_eq!(rx.borrow().len(), 2);

        store.update(Vec::new());
        rx.changed().await.ok();
        assert!(rx.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = SelectionStore::new();
        store.update(vec![item("a"), item("b")]);
        assert!(store.find("b").is_some());
        assert!(store.find("c").is_none());
    }
}
