// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory content and member stores for deterministic testing.
//!
//! Both stores keep their state in `HashMap`s behind `tokio::sync::RwLock`,
//! count underlying lookups so cache tests can assert read-through behavior,
//! and can be switched into a failing mode to exercise error propagation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Mutex, RwLock};

use inkstone_core::types::{ContentId, ContentItem, ContentStatus, Member, MemberId};
use inkstone_core::{ContentStore, InkstoneError, MemberStore};

fn simulated_failure() -> InkstoneError {
    InkstoneError::Store {
        source: Box::new(std::io::Error::other("simulated store failure")),
    }
}

/// A persisted status transition, captured for assertion.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub content_id: ContentId,
    pub status: ContentStatus,
    pub errors: Option<String>,
    pub updated_by: String,
}

/// In-memory [`ContentStore`] double.
pub struct InMemoryContentStore {
    items: Arc<RwLock<HashMap<String, ContentItem>>>,
    updates: Arc<Mutex<Vec<StatusUpdate>>>,
    lookups: Arc<AtomicUsize>,
    fail_lookups: Arc<AtomicBool>,
    fail_updates: Arc<AtomicBool>,
}

impl InMemoryContentStore {
    /// Create an empty content store.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            updates: Arc::new(Mutex::new(Vec::new())),
            lookups: Arc::new(AtomicUsize::new(0)),
            fail_lookups: Arc::new(AtomicBool::new(false)),
            fail_updates: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Insert or replace a content item.
    pub async fn insert(&self, item: ContentItem) {
        self.items.write().await.insert(item.id.0.clone(), item);
    }

    /// Number of lookups that reached this store (cache misses included,
    /// cache hits not).
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Make all subsequent lookups fail with a store error.
    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Make all subsequent status updates fail with a store error.
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// All status transitions persisted through this store, in order.
    pub async fn updates(&self) -> Vec<StatusUpdate> {
        self.updates.lock().await.clone()
    }

    /// Number of persisted status transitions.
    pub async fn update_count(&self) -> usize {
        self.updates.lock().await.len()
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn content_by_id(&self, id: &ContentId) -> Result<Option<ContentItem>, InkstoneError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.read().await.get(&id.0).cloned())
    }

    async fn content_scheduled_for(
        &self,
        date: NaiveDate,
    ) -> Result<Option<ContentItem>, InkstoneError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let items = self.items.read().await;
        Ok(items
            .values()
            .find(|item| item.scheduled_for == Some(date))
            .cloned())
    }

    async fn update_status(
        &self,
        id: &ContentId,
        status: ContentStatus,
        errors: Option<String>,
        updated_by: &str,
    ) -> Result<(), InkstoneError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        let mut items = self.items.write().await;
        if let Some(item) = items.get_mut(&id.0) {
            item.status = status;
            item.validation_errors = errors.clone();
        }
        self.updates.lock().await.push(StatusUpdate {
            content_id: id.clone(),
            status,
            errors,
            updated_by: updated_by.to_string(),
        });
        Ok(())
    }
}

/// In-memory [`MemberStore`] double.
pub struct InMemoryMemberStore {
    members: Arc<RwLock<HashMap<String, Member>>>,
    lookups: Arc<AtomicUsize>,
    fail_lookups: Arc<AtomicBool>,
}

impl InMemoryMemberStore {
    /// Create an empty member store.
    pub fn new() -> Self {
        Self {
            members: Arc::new(RwLock::new(HashMap::new())),
            lookups: Arc::new(AtomicUsize::new(0)),
            fail_lookups: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Insert or replace a member profile.
    pub async fn insert(&self, member: Member) {
        self.members
            .write()
            .await
            .insert(member.id.0.clone(), member);
    }

    /// Number of lookups that reached this store.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Make all subsequent lookups fail with a store error.
    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemoryMemberStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn member_by_id(&self, id: &MemberId) -> Result<Option<Member>, InkstoneError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.members.read().await.get(&id.0).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, make_content, make_member};

    #[tokio::test]
    async fn content_store_counts_lookups() {
        let store = InMemoryContentStore::new();
        store.insert(make_content("c1", date(2026, 8, 23))).await;

        let found = store
            .content_by_id(&ContentId("c1".into()))
            .await
            .expect("lookup");
        assert!(found.is_some());

        let missing = store
            .content_by_id(&ContentId("c2".into()))
            .await
            .expect("lookup");
        assert!(missing.is_none());

        assert_eq!(store.lookup_count(), 2);
    }

    #[tokio::test]
    async fn content_store_finds_by_scheduled_date() {
        let store = InMemoryContentStore::new();
        store.insert(make_content("c1", date(2026, 8, 23))).await;
        store.insert(make_content("c2", date(2026, 8, 24))).await;

        let found = store
            .content_scheduled_for(date(2026, 8, 24))
            .await
            .expect("lookup");
        assert_eq!(found.map(|item| item.id.0), Some("c2".to_string()));

        let none = store
            .content_scheduled_for(date(2026, 8, 25))
            .await
            .expect("lookup");
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn content_store_records_status_updates() {
        let store = InMemoryContentStore::new();
        store.insert(make_content("c1", date(2026, 8, 23))).await;

        store
            .update_status(
                &ContentId("c1".into()),
                ContentStatus::NeedsChanges,
                Some("missing element".into()),
                "reviewer-bot",
            )
            .await
            .expect("update");

        let updates = store.updates().await;
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].status, ContentStatus::NeedsChanges);
        assert_eq!(updates[0].updated_by, "reviewer-bot");

        let item = store
            .content_by_id(&ContentId("c1".into()))
            .await
            .expect("lookup")
            .expect("item");
        assert_eq!(item.status, ContentStatus::NeedsChanges);
        assert_eq!(item.validation_errors.as_deref(), Some("missing element"));
    }

    #[tokio::test]
    async fn failing_mode_returns_store_errors() {
        let store = InMemoryMemberStore::new();
        store.insert(make_member("m1")).await;
        store.fail_lookups(true);

        let err = store
            .member_by_id(&MemberId("m1".into()))
            .await
            .expect_err("should fail");
        assert!(matches!(err, InkstoneError::Store { .. }));
        assert_eq!(store.lookup_count(), 0, "failed lookups are not counted");
    }
}
