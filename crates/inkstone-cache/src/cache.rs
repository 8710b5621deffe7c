// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The TTL read-through cache over the content and member stores.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use inkstone_core::types::{ContentId, ContentItem, Member, MemberId};
use inkstone_core::{ContentStore, InkstoneError, MemberStore};

use crate::lookup::{CacheLookup, Fetched};

/// Cached maps plus the deadline they live under.
///
/// Map entries are `Option<T>`: `Some` is a cached value, `None` a cached
/// confirmed absence. A key missing from the map has never been queried.
struct CacheState {
    armed_at: Instant,
    content_by_id: HashMap<ContentId, Option<ContentItem>>,
    members_by_id: HashMap<MemberId, Option<Member>>,
    content_by_date: HashMap<NaiveDate, Option<ContentItem>>,
}

impl CacheState {
    fn fresh() -> Self {
        Self {
            armed_at: Instant::now(),
            content_by_id: HashMap::new(),
            members_by_id: HashMap::new(),
            content_by_date: HashMap::new(),
        }
    }
}

/// Process-local TTL cache for prompt content and member lookups.
///
/// Every operation first checks the max-age deadline; once it elapses, all
/// three maps are dropped and a new window starts at that access. `reset()`
/// does the same unconditionally. Store failures propagate to the caller and
/// never leave an entry behind.
pub struct PromptCache {
    content_store: Arc<dyn ContentStore>,
    member_store: Arc<dyn MemberStore>,
    max_age: Duration,
    state: RwLock<CacheState>,
}

impl PromptCache {
    /// Create a cache over the given stores, dropping all entries whenever
    /// `max_age` elapses.
    pub fn new(
        content_store: Arc<dyn ContentStore>,
        member_store: Arc<dyn MemberStore>,
        max_age: Duration,
    ) -> Self {
        Self {
            content_store,
            member_store,
            max_age,
            state: RwLock::new(CacheState::fresh()),
        }
    }

    /// Drop all cached entries and restart the max-age window.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        *state = CacheState::fresh();
        debug!("cache reset, all entries dropped");
    }

    /// Cache a content value, or a confirmed absence when `item` is `None`.
    pub async fn set_content(&self, id: &ContentId, item: Option<ContentItem>) {
        self.expire_if_due().await;
        self.state
            .write()
            .await
            .content_by_id
            .insert(id.clone(), item);
    }

    /// Whether any entry (value or confirmed absence) exists for this id.
    pub async fn has_content(&self, id: &ContentId) -> bool {
        self.expire_if_due().await;
        self.state.read().await.content_by_id.contains_key(id)
    }

    /// Read a content entry without touching the store.
    pub async fn get_content(&self, id: &ContentId) -> CacheLookup<ContentItem> {
        self.expire_if_due().await;
        match self.state.read().await.content_by_id.get(id) {
            Some(Some(item)) => CacheLookup::Hit(item.clone()),
            Some(None) => CacheLookup::Absent,
            None => CacheLookup::Unqueried,
        }
    }

    /// Read a content item through the cache, querying the store on a miss.
    ///
    /// Both a found value and a confirmed absence are cached. A store error
    /// propagates and writes no entry, so the next call queries again.
    pub async fn fetch_content(
        &self,
        id: &ContentId,
    ) -> Result<Option<ContentItem>, InkstoneError> {
        self.expire_if_due().await;
        if let Some(entry) = self.state.read().await.content_by_id.get(id) {
            debug!(content_id = %id, "content served from cache");
            return Ok(entry.clone());
        }
        let fetched = self.content_store.content_by_id(id).await?;
        debug!(content_id = %id, found = fetched.is_some(), "content fetched from store");
        self.state
            .write()
            .await
            .content_by_id
            .insert(id.clone(), fetched.clone());
        Ok(fetched)
    }

    /// Read a member through the cache, querying the store on a miss.
    pub async fn get_member(&self, id: &MemberId) -> Result<Fetched<Member>, InkstoneError> {
        self.expire_if_due().await;
        if let Some(entry) = self.state.read().await.members_by_id.get(id) {
            debug!(member_id = %id, "member served from cache");
            return Ok(Fetched {
                value: entry.clone(),
                from_cache: true,
            });
        }
        let fetched = self.member_store.member_by_id(id).await?;
        debug!(member_id = %id, found = fetched.is_some(), "member fetched from store");
        self.state
            .write()
            .await
            .members_by_id
            .insert(id.clone(), fetched.clone());
        Ok(Fetched {
            value: fetched,
            from_cache: false,
        })
    }

    /// Read the content item scheduled for a calendar date through the cache.
    pub async fn content_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Fetched<ContentItem>, InkstoneError> {
        self.expire_if_due().await;
        if let Some(entry) = self.state.read().await.content_by_date.get(&date) {
            debug!(%date, "scheduled content served from cache");
            return Ok(Fetched {
                value: entry.clone(),
                from_cache: true,
            });
        }
        let fetched = self.content_store.content_scheduled_for(date).await?;
        debug!(%date, found = fetched.is_some(), "scheduled content fetched from store");
        self.state
            .write()
            .await
            .content_by_date
            .insert(date, fetched.clone());
        Ok(Fetched {
            value: fetched,
            from_cache: false,
        })
    }

    /// Drop everything once the max-age deadline has passed.
    async fn expire_if_due(&self) {
        let due = self.state.read().await.armed_at.elapsed() >= self.max_age;
        if !due {
            return;
        }
        let mut state = self.state.write().await;
        // Re-check: another task may have swapped the state while we waited
        // for the write lock.
        if state.armed_at.elapsed() >= self.max_age {
            *state = CacheState::fresh();
            debug!("cache max age elapsed, all entries dropped");
        }
    }
}
