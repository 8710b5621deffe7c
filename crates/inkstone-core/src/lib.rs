// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Inkstone notification backend.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Inkstone workspace. Storage backends and
//! channel transports implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::InkstoneError;
pub use types::{
    BUCKET_MINUTES, Channel, ChannelSettings, ContentId, ContentItem, ContentStatus, DeliveryKey,
    LocalStamp, Member, MemberId, NotificationKind, PromptTime, SendOutcome, SendRecord,
};

// Re-export all collaborator traits at crate root.
pub use traits::{ContentStore, MemberStore, PromptSender, SendHistory};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inkstone_error_has_all_variants() {
        // Verify all 7 error variants exist and can be constructed.
        let _config = InkstoneError::Config("test".into());
        let _store = InkstoneError::Store {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = InkstoneError::Channel {
            message: "test".into(),
            source: None,
        };
        let _not_found = InkstoneError::MemberNotFound { id: "test".into() };
        let _timezone = InkstoneError::Timezone {
            member_id: "test".into(),
            zone: "Mars/Olympus".into(),
        };
        let _contract = InkstoneError::Contract("test".into());
        let _internal = InkstoneError::Internal("test".into());
    }

    #[test]
    fn status_codes_round_trip_through_display() {
        use std::str::FromStr;

        let variants = [
            ContentStatus::Submitted,
            ContentStatus::NeedsChanges,
            ContentStatus::Published,
        ];

        for variant in &variants {
            let s = variant.to_string();
            let parsed = ContentStatus::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn channel_serialization_uses_snake_case_codes() {
        let json = serde_json::to_string(&Channel::Push).expect("should serialize");
        assert_eq!(json, "\"push\"");

        let parsed: Channel = serde_json::from_str("\"email\"").expect("should deserialize");
        assert_eq!(parsed, Channel::Email);

        let kind = serde_json::to_string(&NotificationKind::NewPrompt).expect("should serialize");
        assert_eq!(kind, "\"new_prompt\"");
    }

    #[test]
    fn collaborator_traits_are_object_safe() {
        // These traits are consumed as `Arc<dyn Trait>`; this won't compile
        // if any of them loses object safety.
        fn _assert_content(_: &dyn ContentStore) {}
        fn _assert_member(_: &dyn MemberStore) {}
        fn _assert_history(_: &dyn SendHistory) {}
        fn _assert_sender(_: &dyn PromptSender) {}
    }
}
