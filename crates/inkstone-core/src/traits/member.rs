// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Member store trait for profile lookup.

use async_trait::async_trait;

use crate::error::InkstoneError;
use crate::types::{Member, MemberId};

/// Reads member profiles.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Fetches a member by id. `Ok(None)` means the member does not exist.
    async fn member_by_id(&self, id: &MemberId) -> Result<Option<Member>, InkstoneError>;
}
