// SPDX-FileCopyrightText: 2026 Inkstone Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel sender for deterministic testing.
//!
//! `MockSender` implements `PromptSender` for a configurable channel, with
//! captured deliveries for assertion and an injectable failure mode.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use inkstone_core::types::{Channel, ContentId, ContentItem, Member, MemberId};
use inkstone_core::{InkstoneError, PromptSender};

/// A mock prompt sender for one channel.
///
/// Deliveries passed to `send()` are captured and retrievable via `sent()`.
/// After `fail_with()`, every send errors until `clear_failure()`.
pub struct MockSender {
    channel: Channel,
    sent: Arc<Mutex<Vec<(MemberId, ContentId)>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockSender {
    /// Create a mock sender for the given channel.
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            sent: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every subsequent send fail with the given message.
    pub async fn fail_with(&self, message: &str) {
        *self.failure.lock().await = Some(message.to_string());
    }

    /// Return the sender to its succeeding state.
    pub async fn clear_failure(&self) {
        *self.failure.lock().await = None;
    }

    /// All captured deliveries as `(member, content)` pairs, in order.
    pub async fn sent(&self) -> Vec<(MemberId, ContentId)> {
        self.sent.lock().await.clone()
    }

    /// Number of captured deliveries.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl PromptSender for MockSender {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn send(&self, member: &Member, content: &ContentItem) -> Result<(), InkstoneError> {
        if let Some(message) = self.failure.lock().await.clone() {
            return Err(InkstoneError::Channel {
                message,
                source: None,
            });
        }
        self.sent
            .lock()
            .await
            .push((member.id.clone(), content.id.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, make_content, make_member};

    #[tokio::test]
    async fn send_captures_deliveries() {
        let sender = MockSender::new(Channel::Push);
        let member = make_member("m1");
        let content = make_content("c1", date(2026, 8, 23));

        sender.send(&member, &content).await.expect("send");

        let sent = sender.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0 .0, "m1");
        assert_eq!(sent[0].1 .0, "c1");
    }

    #[tokio::test]
    async fn fail_with_makes_sends_error() {
        let sender = MockSender::new(Channel::Email);
        sender.fail_with("smtp connection refused").await;

        let member = make_member("m1");
        let content = make_content("c1", date(2026, 8, 23));
        let err = sender.send(&member, &content).await.expect_err("should fail");
        assert!(matches!(err, InkstoneError::Channel { .. }));
        assert_eq!(sender.sent_count().await, 0);

        sender.clear_failure().await;
        sender.send(&member, &content).await.expect("send");
        assert_eq!(sender.sent_count().await, 1);
    }
}
