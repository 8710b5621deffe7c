// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel sender trait for prompt notification delivery.

use async_trait::async_trait;

use crate::error::InkstoneError;
use crate::types::{Channel, ContentItem, Member};

/// Delivers prompt notifications over one channel.
///
/// Production implementations wrap the real push and email transports and
/// live with the services that own those integrations.
#[async_trait]
pub trait PromptSender: Send + Sync {
    /// The channel this sender delivers on.
    fn channel(&self) -> Channel;

    /// Delivers a new-prompt notification to the member.
    async fn send(&self, member: &Member, content: &ContentItem) -> Result<(), InkstoneError>;
}
