// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers for dispatch outcomes.
//!
//! Uses the metrics-rs facade so any recorder (Prometheus, statsd, etc.)
//! can collect these metrics. Recorder installation belongs to the
//! embedding service.

use metrics::describe_counter;

use inkstone_core::types::Channel;

use crate::outcome::{Disposition, SkipReason};

/// Register all Inkstone dispatch metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "inkstone_dispatch_total",
        "Channel notification attempts by disposition"
    );
    describe_counter!(
        "inkstone_dispatch_skips_total",
        "Dispatch calls that ended before any channel attempt"
    );
}

/// Record a dispatch call that ended without channel attempts.
pub fn record_skip(reason: SkipReason) {
    metrics::counter!("inkstone_dispatch_skips_total", "reason" => reason.to_string()).increment(1);
}

/// Record one channel attempt.
pub fn record_channel(channel: Channel, disposition: &Disposition) {
    metrics::counter!(
        "inkstone_dispatch_total",
        "channel" => channel.to_string(),
        "disposition" => disposition.to_string()
    )
    .increment(1);
}
