// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Send-history trait: the durable dedup ledger for notification attempts.

use async_trait::async_trait;

use crate::error::InkstoneError;
use crate::types::SendRecord;

/// Append-only store of notification attempt records.
///
/// Records are immutable once written. Dedup decisions read this store
/// directly; the TTL cache is never consulted for history.
#[async_trait]
pub trait SendHistory: Send + Sync {
    /// Returns the `sent` record for the given rendered delivery key, if one
    /// exists. `skipped` and `failed` records never match.
    async fn find_sent(&self, delivery_key: &str) -> Result<Option<SendRecord>, InkstoneError>;

    /// Appends a record unconditionally.
    async fn append(&self, record: &SendRecord) -> Result<(), InkstoneError>;

    /// Appends a `sent` record only if no `sent` record exists for the same
    /// delivery key. Returns whether the record was inserted.
    ///
    /// Implementations must make the check and the insert one atomic step so
    /// that concurrent dispatches cannot both write a `sent` record for the
    /// same key.
    async fn append_once(&self, record: &SendRecord) -> Result<bool, InkstoneError>;
}
