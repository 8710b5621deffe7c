// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Inkstone notification workspace.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Width of a send-window bucket in minutes. Preferred times snap down to
/// this grid (minute 0, 15, 30, or 45).
pub const BUCKET_MINUTES: u8 = 15;

/// Unique identifier for a journaling member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a prompt content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub String);

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A member's preferred daily prompt time, as local wall-clock hour and minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTime {
    pub hour: u8,
    pub minute: u8,
}

impl PromptTime {
    /// Start of the 15-minute bucket this time falls in (0, 15, 30, or 45).
    ///
    /// A preferred minute off the grid snaps down, so `9:20` belongs to the
    /// `9:15` bucket.
    pub fn bucket_start(&self) -> u8 {
        self.minute - self.minute % BUCKET_MINUTES
    }
}

/// Per-channel notification opt-in flags on a member profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSettings {
    pub push: bool,
    pub email: bool,
}

impl ChannelSettings {
    /// Whether the member has opted in to the given channel.
    pub fn enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Push => self.push,
            Channel::Email => self.email,
        }
    }

    /// Every channel the member has opted in to, in fixed order.
    pub fn enabled_channels(&self) -> Vec<Channel> {
        let mut channels = Vec::new();
        if self.push {
            channels.push(Channel::Push);
        }
        if self.email {
            channels.push(Channel::Email);
        }
        channels
    }
}

/// A journaling member as read from the member store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    /// IANA time zone name, e.g. `America/New_York`.
    pub timezone: String,
    /// Preferred daily prompt time. `None` means the member never receives
    /// prompt notifications.
    pub prompt_time: Option<PromptTime>,
    pub channels: ChannelSettings,
    /// When the member last replied to a prompt. Carried for other consumers;
    /// the dispatcher does not consult it.
    pub last_reply_at: Option<DateTime<Utc>>,
}

/// Delivery channel for prompt notifications.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Push,
    Email,
}

/// Editorial status of a prompt content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    /// Awaiting editorial review.
    Submitted,
    /// Review found problems; an editor must revise and resubmit.
    NeedsChanges,
    /// Approved and eligible for delivery on its scheduled date.
    Published,
}

/// A prompt content item as read from the content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub status: ContentStatus,
    /// Calendar date the prompt should go out, in member-local terms.
    pub scheduled_for: Option<NaiveDate>,
    /// The journaling element (category tag) this prompt belongs to.
    pub element: Option<String>,
    /// Joined human-readable review errors from the last failed publish run.
    pub validation_errors: Option<String>,
}

/// Kind of notification being delivered.
///
/// Part of the dedup key, so history written for one kind never suppresses
/// another.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewPrompt,
}

/// Identity of one notification attempt for dedup purposes.
///
/// Keyed on the member-local calendar day, never the content id: if editors
/// swap the day's prompt after delivery, the member still gets at most one
/// notification per channel per day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryKey {
    pub member_id: MemberId,
    pub channel: Channel,
    pub kind: NotificationKind,
    pub local_date: NaiveDate,
}

impl DeliveryKey {
    pub fn new(
        member_id: MemberId,
        channel: Channel,
        kind: NotificationKind,
        local_date: NaiveDate,
    ) -> Self {
        Self {
            member_id,
            channel,
            kind,
            local_date,
        }
    }
}

impl fmt::Display for DeliveryKey {
    /// Renders as `member:channel:kind:date`. History records are keyed on
    /// this string, so the format must stay stable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.member_id, self.channel, self.kind, self.local_date
        )
    }
}

/// Outcome recorded for one notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SendOutcome {
    /// The channel sender accepted the notification.
    Sent,
    /// A previous `sent` record suppressed this attempt.
    Skipped,
    /// The channel sender returned an error.
    Failed,
}

/// An immutable send-history record. One record per notification attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendRecord {
    /// Unique record identifier.
    pub id: String,
    pub member_id: MemberId,
    pub content_id: ContentId,
    pub channel: Channel,
    /// Rendered [`DeliveryKey`] this attempt dedups under.
    pub delivery_key: String,
    pub outcome: SendOutcome,
    /// Sender error message when `outcome` is `Failed`.
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SendRecord {
    /// Create a `sent` record for a successful delivery.
    pub fn sent(key: &DeliveryKey, content_id: ContentId, at: DateTime<Utc>) -> Self {
        Self::build(key, content_id, SendOutcome::Sent, None, at)
    }

    /// Create a `skipped` record for an attempt suppressed by dedup.
    pub fn skipped(key: &DeliveryKey, content_id: ContentId, at: DateTime<Utc>) -> Self {
        Self::build(key, content_id, SendOutcome::Skipped, None, at)
    }

    /// Create a `failed` record carrying the sender's error message.
    pub fn failed(
        key: &DeliveryKey,
        content_id: ContentId,
        error: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self::build(key, content_id, SendOutcome::Failed, Some(error.into()), at)
    }

    fn build(
        key: &DeliveryKey,
        content_id: ContentId,
        outcome: SendOutcome,
        error: Option<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            member_id: key.member_id.clone(),
            content_id,
            channel: key.channel,
            delivery_key: key.to_string(),
            outcome,
            error,
            created_at: at,
        }
    }
}

/// A member-local wall-clock reading derived from a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalStamp {
    pub date: NaiveDate,
    pub hour: u8,
    pub minute: u8,
}
