// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The publish state machine for submitted prompts.
//!
//! [`ContentPublisher`] reviews a submitted prompt and either publishes it
//! or sends it back for changes. It uses:
//! - **Re-entrancy guard**: only `submitted` items are reviewed; any other
//!   status reports failure without touching the store.
//! - **Review rules**: a prompt needs a journaling element and a scheduled
//!   send date before it can go out.
//! - **Audit trail**: every persisted transition records the acting identity.

use std::sync::Arc;

use tracing::{info, warn};

use inkstone_core::types::{ContentItem, ContentStatus};
use inkstone_core::{ContentStore, InkstoneError};

/// Result of a publish run.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    /// Whether the item moved to `published`.
    pub success: bool,
    /// The item's in-memory status after the run.
    pub status: ContentStatus,
    /// Human-readable review errors; empty when `success` is true.
    pub errors: Vec<String>,
}

/// Reviews submitted prompts and persists the resulting status transition.
///
/// The item is mutated in memory before the store write goes out, so an
/// `Err` from the store leaves the in-memory status ahead of the persisted
/// one; callers must treat the final state as unknown and retry from a
/// fresh read.
pub struct ContentPublisher {
    store: Arc<dyn ContentStore>,
    actor: String,
}

impl ContentPublisher {
    /// Create a publisher that records `actor` as the updating identity on
    /// every persisted transition.
    pub fn new(store: Arc<dyn ContentStore>, actor: impl Into<String>) -> Self {
        Self {
            store,
            actor: actor.into(),
        }
    }

    /// Review a submitted prompt and publish it or send it back for changes.
    ///
    /// Returns `Ok` with a report for every expected outcome, including a
    /// failed review; `Err` only surfaces store failures.
    pub async fn run(&self, item: &mut ContentItem) -> Result<PublishReport, InkstoneError> {
        // 1. Only submitted items are reviewed.
        if item.status != ContentStatus::Submitted {
            warn!(
                content_id = %item.id,
                status = %item.status,
                "publish requested for content not awaiting review"
            );
            return Ok(PublishReport {
                success: false,
                status: item.status,
                errors: vec![format!(
                    "content is not awaiting review (status: {})",
                    item.status
                )],
            });
        }

        // 2. Collect review errors.
        let errors = Self::review(item);

        // 3. Review failed: back to the editors with the reasons attached.
        if !errors.is_empty() {
            let joined = errors.join("; ");
            item.status = ContentStatus::NeedsChanges;
            item.validation_errors = Some(joined.clone());
            self.store
                .update_status(
                    &item.id,
                    ContentStatus::NeedsChanges,
                    Some(joined),
                    &self.actor,
                )
                .await?;
            info!(
                content_id = %item.id,
                error_count = errors.len(),
                "content sent back for changes"
            );
            return Ok(PublishReport {
                success: false,
                status: ContentStatus::NeedsChanges,
                errors,
            });
        }

        // 4. Review passed: publish.
        item.status = ContentStatus::Published;
        item.validation_errors = None;
        self.store
            .update_status(&item.id, ContentStatus::Published, None, &self.actor)
            .await?;
        info!(content_id = %item.id, "content published");

        Ok(PublishReport {
            success: true,
            status: ContentStatus::Published,
            errors: Vec::new(),
        })
    }

    /// Collect human-readable review errors for a submitted item.
    ///
    /// A whitespace-only element counts as missing.
    fn review(item: &ContentItem) -> Vec<String> {
        let mut errors = Vec::new();
        if item
            .element
            .as_deref()
            .map(str::trim)
            .filter(|element| !element.is_empty())
            .is_none()
        {
            errors.push("a journaling element must be assigned before publishing".to_string());
        }
        if item.scheduled_for.is_none() {
            errors.push("a scheduled send date must be set before publishing".to_string());
        }
        errors
    }
}
