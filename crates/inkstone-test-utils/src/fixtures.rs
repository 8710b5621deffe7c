// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture builders shared across Inkstone tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use inkstone_core::types::{
    Channel, ChannelSettings, ContentId, ContentItem, ContentStatus, DeliveryKey, Member, MemberId,
    NotificationKind, PromptTime,
};

/// A member in `America/New_York` with a 12:15 prompt time and both
/// channels enabled. Tests mutate fields as needed.
pub fn make_member(id: &str) -> Member {
    Member {
        id: MemberId(id.to_string()),
        timezone: "America/New_York".to_string(),
        prompt_time: Some(PromptTime {
            hour: 12,
            minute: 15,
        }),
        channels: ChannelSettings {
            push: true,
            email: true,
        },
        last_reply_at: None,
    }
}

/// A published prompt scheduled for the given date.
pub fn make_content(id: &str, scheduled_for: NaiveDate) -> ContentItem {
    ContentItem {
        id: ContentId(id.to_string()),
        status: ContentStatus::Published,
        scheduled_for: Some(scheduled_for),
        element: Some("reflection".to_string()),
        validation_errors: None,
    }
}

/// A submitted prompt that would pass publish validation.
pub fn submitted_content(id: &str, scheduled_for: NaiveDate) -> ContentItem {
    ContentItem {
        status: ContentStatus::Submitted,
        ..make_content(id, scheduled_for)
    }
}

/// A new-prompt delivery key for the given member, channel, and local date.
pub fn delivery_key(member: &str, channel: Channel, local_date: NaiveDate) -> DeliveryKey {
    DeliveryKey::new(
        MemberId(member.to_string()),
        channel,
        NotificationKind::NewPrompt,
        local_date,
    )
}

/// A calendar date. Panics on invalid input; fixtures take literals.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// A UTC instant at the given date, hour, and minute. Panics on invalid input.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid fixture timestamp")
}
