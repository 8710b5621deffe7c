// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content store trait for prompt lookup and editorial status updates.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::InkstoneError;
use crate::types::{ContentId, ContentItem, ContentStatus};

/// Reads and updates prompt content items.
///
/// Backed by the product's content database in production. Lookups return
/// `Ok(None)` for a missing item; `Err` is reserved for backend failures.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetches a content item by id.
    async fn content_by_id(&self, id: &ContentId) -> Result<Option<ContentItem>, InkstoneError>;

    /// Fetches the content item scheduled for the given calendar date, if any.
    async fn content_scheduled_for(
        &self,
        date: NaiveDate,
    ) -> Result<Option<ContentItem>, InkstoneError>;

    /// Persists a status transition, recording the acting identity.
    ///
    /// `errors` carries the joined review errors for a `NeedsChanges`
    /// transition and clears any previous value when `None`.
    async fn update_status(
        &self,
        id: &ContentId,
        status: ContentStatus,
        errors: Option<String>,
        updated_by: &str,
    ) -> Result<(), InkstoneError>;
}
