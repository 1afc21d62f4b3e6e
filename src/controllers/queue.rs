// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! De-duplicating work queue shared by the workers of one controller.
//!
//! A key is held at most once while waiting, and is never handed to two
//! workers at the same time: a key re-added while it is being processed
//! is parked until `done` is called for it.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::trace;

#[derive(Default)]
struct QueueState {
    dirty: HashSet<String>,
    processing: HashSet<String>,
}

pub struct WorkQueue {
    state: Mutex<QueueState>,
    tx: mpsc::UnboundedSender<String>,
    rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<String>>,
}

impl WorkQueue {
    pub fn new() -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            state: Mutex::new(QueueState::default()),
            tx,
            rx: tokio::sync::Mutex::new(rx),
        })
    }

    pub fn add(&self, key: String) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.dirty.insert(key.clone()) {
            trace!("Key {} already queued", key);
            return;
        }
        if state.processing.contains(&key) {
            return;
        }
        // The receiver lives as long as the queue itself
        let _ = self.tx.send(key);
    }

    /// Add `key` once `delay` has passed
    pub fn add_after(self: &Arc<Self>, key: String, delay: Duration) {
        let queue = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            queue.add(key);
        });
    }

    /// Wait for the next key. The caller must hand it back with `done`.
    pub async fn get(&self) -> Option<String> {
        let key = self.rx.lock().await.recv().await?;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.dirty.remove(&key);
        state.processing.insert(key.clone());
        Some(key)
    }

    pub fn done(&self, key: &str) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.processing.remove(key);
        if state.dirty.contains(key) {
            let _ = self.tx.send(key.to_string());
        }
    }

    /// Number of keys waiting to be processed
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .dirty
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
