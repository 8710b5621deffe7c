// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome types returned by the dispatcher.
//!
//! Expected delivery results are values, not errors; the task layer
//! serializes these into its responses and monitoring counters key on
//! their codes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use inkstone_core::types::Channel;

/// Why a dispatch call ended without attempting any channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The member-local time is outside the preferred send window.
    NotSendTime,
    /// No published prompt is scheduled for the member's local date.
    NoContent,
    /// The member has no enabled channel with a registered sender.
    NoChannels,
}

/// What happened on one channel during a dispatch call.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Delivered and recorded in history.
    Sent,
    /// Suppressed: history already holds a `sent` record for this local day.
    AlreadySent,
    /// The sender failed; the error is recorded in history.
    Failed { error: String },
}

/// Per-channel result of a dispatch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOutcome {
    pub channel: Channel,
    pub disposition: Disposition,
}

/// Aggregate result of one `maybe_notify` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The call ended before any channel attempt.
    Skipped { reason: SkipReason },
    /// Channel attempts ran; one entry per eligible channel.
    Completed { channels: Vec<ChannelOutcome> },
}

impl DispatchOutcome {
    /// Number of channels that delivered in this call.
    pub fn sent_count(&self) -> usize {
        self.count(|disposition| matches!(disposition, Disposition::Sent))
    }

    /// Number of channels that failed in this call.
    pub fn failed_count(&self) -> usize {
        self.count(|disposition| matches!(disposition, Disposition::Failed { .. }))
    }

    fn count(&self, matches: impl Fn(&Disposition) -> bool) -> usize {
        match self {
            DispatchOutcome::Skipped { .. } => 0,
            DispatchOutcome::Completed { channels } => channels
                .iter()
                .filter(|outcome| matches(&outcome.disposition))
                .count(),
        }
    }
}
