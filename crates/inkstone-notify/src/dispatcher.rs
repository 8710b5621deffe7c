// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-member notification dispatcher.
//!
//! [`PromptDispatcher::maybe_notify`] sits at the top of the delivery
//! pipeline: the trigger layer calls it once per member per 15-minute
//! bucket with the current UTC instant, and the dispatcher decides whether
//! anything goes out. It uses:
//! - **Window matching**: the member's preferred time against their local
//!   wall clock.
//! - **Cached lookups**: member and content reads go through the TTL cache.
//! - **Durable dedup**: at most one `sent` record per member, channel,
//!   kind, and local day; the conditional history insert closes the
//!   concurrent-trigger race.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use inkstone_cache::PromptCache;
use inkstone_core::types::{
    ContentItem, ContentStatus, DeliveryKey, Member, MemberId, NotificationKind, SendRecord,
};
use inkstone_core::{InkstoneError, PromptSender, SendHistory};

use crate::metrics;
use crate::outcome::{ChannelOutcome, DispatchOutcome, Disposition, SkipReason};
use crate::window::{is_send_time, member_local};

/// Decides and performs per-member prompt delivery.
///
/// All collaborators are injected; the dispatcher holds no global state and
/// one instance serves every member in the process.
pub struct PromptDispatcher {
    cache: Arc<PromptCache>,
    history: Arc<dyn SendHistory>,
    senders: Vec<Arc<dyn PromptSender>>,
    kind: NotificationKind,
}

impl PromptDispatcher {
    /// Create a dispatcher over the given cache, history, and channel
    /// senders. Senders are attempted in registration order.
    pub fn new(
        cache: Arc<PromptCache>,
        history: Arc<dyn SendHistory>,
        senders: Vec<Arc<dyn PromptSender>>,
    ) -> Self {
        Self {
            cache,
            history,
            senders,
            kind: NotificationKind::NewPrompt,
        }
    }

    /// Decide whether the member gets their daily prompt right now, and
    /// deliver it on every eligible channel.
    ///
    /// Expected outcomes (wrong time, no content, nothing enabled, a failing
    /// transport) come back as `Ok`; `Err` surfaces broken collaborators,
    /// bad member data, and caller bugs.
    pub async fn maybe_notify(
        &self,
        member_id: &MemberId,
        now: DateTime<Utc>,
    ) -> Result<DispatchOutcome, InkstoneError> {
        // 1. An empty id is a caller bug, not a skip.
        if member_id.0.trim().is_empty() {
            return Err(InkstoneError::Contract(
                "maybe_notify requires a member id".to_string(),
            ));
        }

        // 2. Resolve the member; a missing profile aborts the call.
        let member = self
            .cache
            .get_member(member_id)
            .await?
            .value
            .ok_or_else(|| InkstoneError::MemberNotFound {
                id: member_id.to_string(),
            })?;

        // 3. Preferred window against the member's local clock.
        let local = member_local(now, &member.timezone, member_id)?;
        let in_window = member
            .prompt_time
            .as_ref()
            .is_some_and(|preferred| is_send_time(&local, preferred));
        if !in_window {
            debug!(
                member_id = %member_id,
                hour = local.hour,
                minute = local.minute,
                "not send time"
            );
            return Ok(self.skip(SkipReason::NotSendTime));
        }

        // 4. Today's published prompt, if any.
        let content = match self.cache.content_for_date(local.date).await?.value {
            Some(item) if item.status == ContentStatus::Published => item,
            _ => {
                debug!(member_id = %member_id, date = %local.date, "no published content for local date");
                return Ok(self.skip(SkipReason::NoContent));
            }
        };

        // 5. Channels the member enabled and we can actually send on.
        let eligible: Vec<&Arc<dyn PromptSender>> = self
            .senders
            .iter()
            .filter(|sender| member.channels.enabled(sender.channel()))
            .collect();
        if eligible.is_empty() {
            debug!(
                member_id = %member_id,
                enabled = ?member.channels.enabled_channels(),
                "no eligible channels"
            );
            return Ok(self.skip(SkipReason::NoChannels));
        }

        // 6. One attempt per channel; a failing channel never blocks the rest.
        let mut channels = Vec::with_capacity(eligible.len());
        for sender in eligible {
            let disposition = self
                .notify_channel(sender.as_ref(), &member, &content, local.date, now)
                .await?;
            metrics::record_channel(sender.channel(), &disposition);
            channels.push(ChannelOutcome {
                channel: sender.channel(),
                disposition,
            });
        }

        Ok(DispatchOutcome::Completed { channels })
    }

    fn skip(&self, reason: SkipReason) -> DispatchOutcome {
        metrics::record_skip(reason);
        DispatchOutcome::Skipped { reason }
    }

    /// Run the dedup check and delivery for one channel.
    ///
    /// History failures propagate; sender failures become a `failed` record
    /// and a `Failed` disposition.
    async fn notify_channel(
        &self,
        sender: &dyn PromptSender,
        member: &Member,
        content: &ContentItem,
        local_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Disposition, InkstoneError> {
        let channel = sender.channel();
        let key = DeliveryKey::new(member.id.clone(), channel, self.kind, local_date);
        let rendered = key.to_string();

        if self.history.find_sent(&rendered).await?.is_some() {
            debug!(
                member_id = %member.id,
                channel = %channel,
                delivery_key = %rendered,
                "already sent for this local day"
            );
            self.history
                .append(&SendRecord::skipped(&key, content.id.clone(), now))
                .await?;
            return Ok(Disposition::AlreadySent);
        }

        match sender.send(member, content).await {
            Ok(()) => {
                let record = SendRecord::sent(&key, content.id.clone(), now);
                let inserted = self.history.append_once(&record).await?;
                if !inserted {
                    // Another dispatch claimed the key between our check and
                    // the insert. Delivery still happened, so the outcome
                    // stands; the duplicate is visible here and in history.
                    warn!(
                        member_id = %member.id,
                        channel = %channel,
                        delivery_key = %rendered,
                        "concurrent dispatch already recorded this send"
                    );
                }
                info!(
                    member_id = %member.id,
                    channel = %channel,
                    content_id = %content.id,
                    "prompt notification sent"
                );
                Ok(Disposition::Sent)
            }
            Err(err) => {
                let message = err.to_string();
                warn!(
                    member_id = %member.id,
                    channel = %channel,
                    error = %message,
                    "prompt delivery failed"
                );
                self.history
                    .append(&SendRecord::failed(
                        &key,
                        content.id.clone(),
                        message.clone(),
                        now,
                    ))
                    .await?;
                Ok(Disposition::Failed { error: message })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use inkstone_core::types::{Channel, SendOutcome};
    use inkstone_test_utils::fixtures::{date, delivery_key, make_content, make_member, utc};
    use inkstone_test_utils::{
        InMemoryContentStore, InMemoryMemberStore, InMemorySendHistory, MockSender,
    };

    struct Rig {
        dispatcher: PromptDispatcher,
        content_store: Arc<InMemoryContentStore>,
        member_store: Arc<InMemoryMemberStore>,
        history: Arc<InMemorySendHistory>,
        push: Arc<MockSender>,
        email: Arc<MockSender>,
    }

    fn make_rig() -> Rig {
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
        Rig {
            dispatcher,
            content_store,
            member_store,
            history,
            push,
            email,
        }
    }

    /// Seeds a member in their window and a published prompt for the day.
    /// `utc(2026, 8, 23, 16, 15)` is 12:15 in New York.
    async fn seed_happy_path(rig: &Rig) {
        rig.member_store.insert(make_member("m1")).await;
        rig.content_store
            .insert(make_content("c1", date(2026, 8, 23)))
            .await;
    }

    #[tokio::test]
    async fn sends_on_every_enabled_channel() {
        let rig = make_rig();
        seed_happy_path(&rig).await;

        let outcome = rig
            .dispatcher
            .maybe_notify(&MemberId("m1".into()), utc(2026, 8, 23, 16, 15))
            .await
            .expect("dispatch");

        assert_eq!(outcome.sent_count(), 2);
        assert_eq!(rig.push.sent_count().await, 1);
        assert_eq!(rig.email.sent_count().await, 1);

        let push_key = delivery_key("m1", Channel::Push, date(2026, 8, 23)).to_string();
        let email_key = delivery_key("m1", Channel::Email, date(2026, 8, 23)).to_string();
        assert_eq!(rig.history.sent_count_for(&push_key).await, 1);
        assert_eq!(rig.history.sent_count_for(&email_key).await, 1);
    }

    #[tokio::test]
    async fn skips_outside_the_send_window() {
        let rig = make_rig();
        seed_happy_path(&rig).await;

        // 13:00 in New York, preferred window is 12:15.
        let outcome = rig
            .dispatcher
            .maybe_notify(&MemberId("m1".into()), utc(2026, 8, 23, 17, 0))
            .await
            .expect("dispatch");

        assert_eq!(
            outcome,
            DispatchOutcome::Skipped {
                reason: SkipReason::NotSendTime
            }
        );
        assert_eq!(rig.push.sent_count().await, 0);
    }

    #[tokio::test]
    async fn skips_members_without_a_preferred_time() {
        let rig = make_rig();
        let mut member = make_member("m1");
        member.prompt_time = None;
        rig.member_store.insert(member).await;
        rig.content_store
            .insert(make_content("c1", date(2026, 8, 23)))
            .await;

        let outcome = rig
            .dispatcher
            .maybe_notify(&MemberId("m1".into()), utc(2026, 8, 23, 16, 15))
            .await
            .expect("dispatch");

        assert_eq!(
            outcome,
            DispatchOutcome::Skipped {
                reason: SkipReason::NotSendTime
            }
        );
    }

    #[tokio::test]
    async fn skips_when_no_content_is_scheduled_for_the_local_date() {
        let rig = make_rig();
        rig.member_store.insert(make_member("m1")).await;
        // Content exists, but for the following day.
        rig.content_store
            .insert(make_content("c1", date(2026, 8, 24)))
            .await;

        let outcome = rig
            .dispatcher
            .maybe_notify(&MemberId("m1".into()), utc(2026, 8, 23, 16, 15))
            .await
            .expect("dispatch");

        assert_eq!(
            outcome,
            DispatchOutcome::Skipped {
                reason: SkipReason::NoContent
            }
        );
    }

    #[tokio::test]
    async fn skips_when_the_scheduled_content_is_not_published() {
        let rig = make_rig();
        rig.member_store.insert(make_member("m1")).await;
        let mut item = make_content("c1", date(2026, 8, 23));
        item.status = ContentStatus::Submitted;
        rig.content_store.insert(item).await;

        let outcome = rig
            .dispatcher
            .maybe_notify(&MemberId("m1".into()), utc(2026, 8, 23, 16, 15))
            .await
            .expect("dispatch");

        assert_eq!(
            outcome,
            DispatchOutcome::Skipped {
                reason: SkipReason::NoContent
            }
        );
    }

    #[tokio::test]
    async fn skips_when_every_channel_is_disabled() {
        let rig = make_rig();
        let mut member = make_member("m1");
        member.channels.push = false;
        member.channels.email = false;
        rig.member_store.insert(member).await;
        rig.content_store
            .insert(make_content("c1", date(2026, 8, 23)))
            .await;

        let outcome = rig
            .dispatcher
            .maybe_notify(&MemberId("m1".into()), utc(2026, 8, 23, 16, 15))
            .await
            .expect("dispatch");

        assert_eq!(
            outcome,
            DispatchOutcome::Skipped {
                reason: SkipReason::NoChannels
            }
        );
        assert!(rig.history.records().await.is_empty());
    }

    #[tokio::test]
    async fn skips_when_no_sender_covers_the_enabled_channel() {
        // Dispatcher registered with a push sender only.
        let content_store = Arc::new(InMemoryContentStore::new());
        let member_store = Arc::new(InMemoryMemberStore::new());
        let cache = Arc::new(PromptCache::new(
            content_store.clone(),
            member_store.clone(),
            Duration::from_secs(900),
        ));
        let history = Arc::new(InMemorySendHistory::new());
        let push = Arc::new(MockSender::new(Channel::Push));
        let senders: Vec<Arc<dyn PromptSender>> = vec![push.clone()];
        let dispatcher = PromptDispatcher::new(cache, history, senders);

        let mut member = make_member("m1");
        member.channels.push = false;
        member.channels.email = true;
        member_store.insert(member).await;
        content_store
            .insert(make_content("c1", date(2026, 8, 23)))
            .await;

        let outcome = dispatcher
            .maybe_notify(&MemberId("m1".into()), utc(2026, 8, 23, 16, 15))
            .await
            .expect("dispatch");

        assert_eq!(
            outcome,
            DispatchOutcome::Skipped {
                reason: SkipReason::NoChannels
            }
        );
        assert_eq!(push.sent_count().await, 0);
    }

    #[tokio::test]
    async fn failing_channel_does_not_block_the_others() {
        let rig = make_rig();
        seed_happy_path(&rig).await;
        rig.push.fail_with("device token expired").await;

        let outcome = rig
            .dispatcher
            .maybe_notify(&MemberId("m1".into()), utc(2026, 8, 23, 16, 15))
            .await
            .expect("dispatch");

        assert_eq!(outcome.sent_count(), 1);
        assert_eq!(outcome.failed_count(), 1);
        assert_eq!(rig.email.sent_count().await, 1);

        let push_key = delivery_key("m1", Channel::Push, date(2026, 8, 23)).to_string();
        let push_records = rig.history.records_for(&push_key).await;
        assert_eq!(push_records.len(), 1);
        assert_eq!(push_records[0].outcome, SendOutcome::Failed);
        assert!(
            push_records[0]
                .error
                .as_deref()
                .expect("error recorded")
                .contains("device token expired")
        );
    }

    #[tokio::test]
    async fn empty_member_id_is_a_contract_error() {
        let rig = make_rig();

        let err = rig
            .dispatcher
            .maybe_notify(&MemberId("  ".into()), utc(2026, 8, 23, 16, 15))
            .await
            .expect_err("caller bug");

        assert!(matches!(err, InkstoneError::Contract(_)));
    }

    #[tokio::test]
    async fn unknown_member_aborts_the_call() {
        let rig = make_rig();

        let err = rig
            .dispatcher
            .maybe_notify(&MemberId("ghost".into()), utc(2026, 8, 23, 16, 15))
            .await
            .expect_err("missing profile");

        assert!(matches!(err, InkstoneError::MemberNotFound { .. }));
    }

    #[tokio::test]
    async fn broken_member_timezone_aborts_the_call() {
        let rig = make_rig();
        let mut member = make_member("m1");
        member.timezone = "Not/AZone".to_string();
        rig.member_store.insert(member).await;

        let err = rig
            .dispatcher
            .maybe_notify(&MemberId("m1".into()), utc(2026, 8, 23, 16, 15))
            .await
            .expect_err("bad zone data");

        assert!(matches!(err, InkstoneError::Timezone { .. }));
    }

    #[tokio::test]
    async fn history_read_failure_propagates() {
        let rig = make_rig();
        seed_happy_path(&rig).await;
        rig.history.fail_reads(true);

        let err = rig
            .dispatcher
            .maybe_notify(&MemberId("m1".into()), utc(2026, 8, 23, 16, 15))
            .await
            .expect_err("dedup storage is down");

        assert!(matches!(err, InkstoneError::Store { .. }));
        assert_eq!(
            rig.push.sent_count().await,
            0,
            "no delivery without a dedup answer"
        );
    }
}
