// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory send-history store for deterministic testing.
//!
//! `InMemorySendHistory` keeps all records in one `Vec` behind a single
//! `Mutex`, which makes `append_once` trivially atomic: the duplicate check
//! and the insert happen under the same lock, matching the conditional-insert
//! contract durable backends implement with a unique index.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use inkstone_core::types::{SendOutcome, SendRecord};
use inkstone_core::{InkstoneError, SendHistory};

/// In-memory [`SendHistory`] double.
pub struct InMemorySendHistory {
    records: Arc<Mutex<Vec<SendRecord>>>,
    fail_reads: Arc<AtomicBool>,
}

impl InMemorySendHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            fail_reads: Arc::new(AtomicBool::new(false)),
        }
    }

    /// All records appended so far, in order.
    pub async fn records(&self) -> Vec<SendRecord> {
        self.records.lock().await.clone()
    }

    /// All records for the given rendered delivery key, in order.
    pub async fn records_for(&self, delivery_key: &str) -> Vec<SendRecord> {
        self.records
            .lock()
            .await
            .iter()
            .filter(|record| record.delivery_key == delivery_key)
            .cloned()
            .collect()
    }

    /// Number of `sent` records for the given rendered delivery key.
    pub async fn sent_count_for(&self, delivery_key: &str) -> usize {
        self.records
            .lock()
            .await
            .iter()
            .filter(|record| {
                record.delivery_key == delivery_key && record.outcome == SendOutcome::Sent
            })
            .count()
    }

    /// Make all subsequent `find_sent` calls fail with a store error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemorySendHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SendHistory for InMemorySendHistory {
    async fn find_sent(&self, delivery_key: &str) -> Result<Option<SendRecord>, InkstoneError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(InkstoneError::Store {
                source: Box::new(std::io::Error::other("simulated history failure")),
            });
        }
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .find(|record| {
                record.delivery_key == delivery_key && record.outcome == SendOutcome::Sent
            })
            .cloned())
    }

    async fn append(&self, record: &SendRecord) -> Result<(), InkstoneError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }

    async fn append_once(&self, record: &SendRecord) -> Result<bool, InkstoneError> {
        let mut records = self.records.lock().await;
        let already_sent = records.iter().any(|existing| {
            existing.delivery_key == record.delivery_key && existing.outcome == SendOutcome::Sent
        });
        if already_sent {
            return Ok(false);
        }
        records.push(record.clone());
        Ok(true)
    }
}
