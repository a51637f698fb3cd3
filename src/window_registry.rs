use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use crate::SECONDARY_WINDOW_PREFIX;

/// Owns the set of live content windows, in creation order. All mutation
/// happens from shell callbacks on the coordination thread; the mutexes only
/// guard against the async update task reading concurrently.
#[derive(Debug, Default)]
pub(crate) struct WindowRegistry {
    labels: Mutex<Vec<String>>,
    handshaken: Mutex<HashSet<String>>,
    secondary_counter: AtomicUsize,
}

impl WindowRegistry {
    pub(crate) fn register(&self, label: &str) {
        if let Ok(mut labels) = self.labels.lock() {
            if !labels.iter().any(|existing| existing == label) {
                labels.push(label.to_string());
            }
        }
    }

    pub(crate) fn remove(&self, label: &str) {
        if let Ok(mut labels) = self.labels.lock() {
            labels.retain(|existing| existing != label);
        }
        if let Ok(mut handshaken) = self.handshaken.lock() {
            handshaken.remove(label);
        }
    }

    /// First window in creation order; reactivation focuses this one.
    pub(crate) fn first_label(&self) -> Option<String> {
        self.labels
            .lock()
            .ok()
            .and_then(|labels| labels.first().cloned())
    }

    pub(crate) fn window_count(&self) -> usize {
        self.labels.lock().map(|labels| labels.len()).unwrap_or(0)
    }

    /// Labels are never reused, even after a secondary window closes.
    pub(crate) fn next_secondary_label(&self) -> String {
        let id = self.secondary_counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{SECONDARY_WINDOW_PREFIX}-{id}")
    }

    /// Returns true exactly once per window label.
    pub(crate) fn mark_handshaken(&self, label: &str) -> bool {
        self.handshaken
            .lock()
            .map(|mut handshaken| handshaken.insert(label.to_string()))
            .unwrap_or(false)
    }
}
