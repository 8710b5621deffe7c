// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end dispatch flows over the in-memory doubles: idempotency across
//! repeated triggers, recovery after a partial channel failure, and cached
//! lookups between calls.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use inkstone_cache::PromptCache;
use inkstone_core::PromptSender;
use inkstone_core::types::{Channel, MemberId, SendOutcome};
use inkstone_notify::{DispatchOutcome, Disposition, PromptDispatcher, SkipReason};
use inkstone_test_utils::fixtures::{date, delivery_key, make_content, make_member, utc};
use inkstone_test_utils::{
    InMemoryContentStore, InMemoryMemberStore, InMemorySendHistory, MockSender,
};

struct Flow {
    dispatcher: PromptDispatcher,
    content_store: Arc<InMemoryContentStore>,
    member_store: Arc<InMemoryMemberStore>,
    history: Arc<InMemorySendHistory>,
    push: Arc<MockSender>,
    email: Arc<MockSender>,
}

/// Wires a dispatcher over fresh in-memory stores with push and email
/// senders, a member in New York preferring 12:15, and a published prompt
/// for 2026-08-23.
async fn seeded_flow() -> Flow {
    let content_store = Arc::new(InMemoryContentStore::new());
    let member_store = Arc::new(InMemoryMemberStore::new());
    let cache = Arc::new(PromptCache::new(
        content_store.clone(),
        member_store.clone(),
        Duration::from_secs(900),
    ));
    let history = Arc::new(InMemorySendHistory::new());
    let push = Arc::new(MockSender::new(Channel::Push));
    let email = Arc::new(MockSender::new(Channel::Email));
    let senders: Vec<Arc<dyn PromptSender>> = vec![push.clone(), email.clone()];
    let dispatcher = PromptDispatcher::new(cache, history.clone(), senders);

    member_store.insert(make_member("m1")).await;
    content_store
        .insert(make_content("c1", date(2026, 8, 23)))
        .await;

    Flow {
        dispatcher,
        content_store,
        member_store,
        history,
        push,
        email,
    }
}

fn member() -> MemberId {
    MemberId("m1".into())
}

#[tokio::test]
async fn second_trigger_in_the_same_window_does_not_resend() {
    let flow = seeded_flow().await;

    // 16:15 and 16:20 UTC are 12:15 and 12:20 in New York, both inside
    // the member's preferred bucket.
    let first = flow
        .dispatcher
        .maybe_notify(&member(), utc(2026, 8, 23, 16, 15))
        .await
        .expect("first dispatch");
    let second = flow
        .dispatcher
        .maybe_notify(&member(), utc(2026, 8, 23, 16, 20))
        .await
        .expect("second dispatch");

    assert_eq!(first.sent_count(), 2);
    match &second {
        DispatchOutcome::Completed { channels } => {
            assert!(
                channels
                    .iter()
                    .all(|c| c.disposition == Disposition::AlreadySent),
                "repeat trigger must suppress both channels: {channels:?}"
            );
        }
        other => panic!("expected completed outcome, got {other:?}"),
    }

    // One actual delivery per channel.
    assert_eq!(flow.push.sent_count().await, 1);
    assert_eq!(flow.email.sent_count().await, 1);

    // History keeps one sent record per key plus the suppression audit.
    for channel in [Channel::Push, Channel::Email] {
        let key = delivery_key("m1", channel, date(2026, 8, 23)).to_string();
        assert_eq!(flow.history.sent_count_for(&key).await, 1);
        let records = flow.history.records_for(&key).await;
        assert_eq!(records.len(), 2, "sent and skipped records for {key}");
        assert_eq!(records[0].outcome, SendOutcome::Sent);
        assert_eq!(records[1].outcome, SendOutcome::Skipped);
    }
}

#[tokio::test]
async fn retry_after_partial_failure_sends_only_the_failed_channel() {
    let flow = seeded_flow().await;
    flow.push.fail_with("device token expired").await;

    let first = flow
        .dispatcher
        .maybe_notify(&member(), utc(2026, 8, 23, 16, 15))
        .await
        .expect("first dispatch");
    assert_eq!(first.sent_count(), 1);
    assert_eq!(first.failed_count(), 1);

    flow.push.clear_failure().await;
    let second = flow
        .dispatcher
        .maybe_notify(&member(), utc(2026, 8, 23, 16, 20))
        .await
        .expect("second dispatch");

    match &second {
        DispatchOutcome::Completed { channels } => {
            let push = channels
                .iter()
                .find(|c| c.channel == Channel::Push)
                .expect("push outcome");
            let email = channels
                .iter()
                .find(|c| c.channel == Channel::Email)
                .expect("email outcome");
            assert_eq!(push.disposition, Disposition::Sent, "failed channel retries");
            assert_eq!(
                email.disposition,
                Disposition::AlreadySent,
                "delivered channel stays suppressed"
            );
        }
        other => panic!("expected completed outcome, got {other:?}"),
    }

    assert_eq!(flow.push.sent_count().await, 1);
    assert_eq!(flow.email.sent_count().await, 1);

    let push_key = delivery_key("m1", Channel::Push, date(2026, 8, 23)).to_string();
    let outcomes: Vec<SendOutcome> = flow
        .history
        .records_for(&push_key)
        .await
        .iter()
        .map(|record| record.outcome)
        .collect();
    assert_eq!(outcomes, vec![SendOutcome::Failed, SendOutcome::Sent]);
}

#[tokio::test]
async fn member_and_content_reads_are_cached_between_triggers() {
    let flow = seeded_flow().await;

    flow.dispatcher
        .maybe_notify(&member(), utc(2026, 8, 23, 16, 15))
        .await
        .expect("first dispatch");
    flow.dispatcher
        .maybe_notify(&member(), utc(2026, 8, 23, 16, 20))
        .await
        .expect("second dispatch");

    assert_eq!(
        flow.member_store.lookup_count(),
        1,
        "second trigger reads the member from cache"
    );
    assert_eq!(
        flow.content_store.lookup_count(),
        1,
        "second trigger reads the scheduled content from cache"
    );
}

#[tokio::test]
async fn off_window_trigger_leaves_no_trace() {
    let flow = seeded_flow().await;

    // 11:00 in New York.
    let outcome = flow
        .dispatcher
        .maybe_notify(&member(), utc(2026, 8, 23, 15, 0))
        .await
        .expect("dispatch");

    assert_eq!(
        outcome,
        DispatchOutcome::Skipped {
            reason: SkipReason::NotSendTime
        }
    );
    assert!(flow.history.records().await.is_empty());
    assert_eq!(flow.push.sent_count().await, 0);
    assert_eq!(flow.email.sent_count().await, 0);
}

#[tokio::test]
async fn outcomes_serialize_with_snake_case_codes() {
    let flow = seeded_flow().await;

    let skipped = flow
        .dispatcher
        .maybe_notify(&member(), utc(2026, 8, 23, 15, 0))
        .await
        .expect("dispatch");
    assert_eq!(
        serde_json::to_value(&skipped).expect("serialize"),
        json!({ "skipped": { "reason": "not_send_time" } })
    );

    let completed = flow
        .dispatcher
        .maybe_notify(&member(), utc(2026, 8, 23, 16, 15))
        .await
        .expect("dispatch");
    assert_eq!(
        serde_json::to_value(&completed).expect("serialize"),
        json!({
            "completed": {
                "channels": [
                    { "channel": "push", "disposition": "sent" },
                    { "channel": "email", "disposition": "sent" }
                ]
            }
        })
    );
}
