// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Member-local time and the 15-minute send-window matcher.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use inkstone_core::InkstoneError;
use inkstone_core::types::{BUCKET_MINUTES, LocalStamp, MemberId, PromptTime};

/// Convert a UTC instant into the member's local wall-clock reading.
///
/// `zone` must be an IANA name like `Europe/Berlin`. An unknown zone is a
/// data error on the member profile and aborts the caller.
pub fn member_local(
    now: DateTime<Utc>,
    zone: &str,
    member_id: &MemberId,
) -> Result<LocalStamp, InkstoneError> {
    let tz: Tz = zone.parse().map_err(|_| InkstoneError::Timezone {
        member_id: member_id.to_string(),
        zone: zone.to_string(),
    })?;
    let local = now.with_timezone(&tz);
    Ok(LocalStamp {
        date: local.date_naive(),
        hour: local.hour() as u8,
        minute: local.minute() as u8,
    })
}

/// Whether a local wall-clock reading falls in the member's send window.
///
/// The preferred minute snaps down to the 15-minute grid and opens the
/// window `[bucket_start, bucket_start + 15)` within the preferred hour.
/// A reading on the closing boundary belongs to the next bucket: a 12:15
/// preference matches 12:15 through 12:29 and not 12:30.
pub fn is_send_time(local: &LocalStamp, preferred: &PromptTime) -> bool {
    if local.hour != preferred.hour {
        return false;
    }
    let start = preferred.bucket_start();
    local.minute >= start && local.minute < start + BUCKET_MINUTES
}
