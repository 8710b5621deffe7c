// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt notification scheduling and delivery.
//!
//! This crate decides, member by member, whether the daily reflection
//! prompt goes out right now, and delivers it over every enabled channel
//! at most once per member-local day. The trigger layer calls
//! [`PromptDispatcher::maybe_notify`] once per member per 15-minute bucket;
//! everything after that decision lives here.

pub mod dispatcher;
pub mod metrics;
pub mod outcome;
pub mod window;

pub use dispatcher::PromptDispatcher;
pub use outcome::{ChannelOutcome, DispatchOutcome, Disposition, SkipReason};
pub use window::{is_send_time, member_local};
