// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel gateway for deterministic testing.
//!
//! `MockGateway` implements `ChannelGateway` with a scripted channel list and
//! per-channel history, records every call for assertion, and can be told to
//! fail on a specific call.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use slackr_core::{ChannelGateway, ChannelRef, Message, SlackrError};

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    ListChannels,
    FetchHistory { channel_id: String, count: usize },
    Archive { channel_id: String },
    Post { channel_id: String, text: String },
}

impl GatewayCall {
    /// Whether this call changes remote state.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::Archive { .. } | Self::Post { .. })
    }
}

#[derive(Default)]
struct State {
    channels: Vec<ChannelRef>,
    history: HashMap<String, Vec<Message>>,
    calls: Vec<GatewayCall>,
    fail_on: Option<GatewayCall>,
}

/// A scripted remote gateway.
///
/// Clones share state, so a test can hand one clone to the code under test
/// and inspect the recorded calls through another.
#[derive(Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<State>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a channel to the non-archived listing with the given history
    /// (newest first, as the real API returns it).
    pub async fn add_channel(&self, id: &str, name: &str, history: Vec<Message>) {
        let mut state = self.state.lock().await;
        state.channels.push(ChannelRef::new(id, name));
        state.history.insert(id.to_string(), history);
    }

    /// Makes the first call equal to `call` return a gateway error.
    pub async fn fail_on(&self, call: GatewayCall) {
        self.state.lock().await.fail_on = Some(call);
    }

    /// All calls received so far, in order.
    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().await.calls.clone()
    }

    /// Channel ids passed to `archive_channel`.
    pub async fn archived(&self) -> Vec<String> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::Archive { channel_id } => Some(channel_id),
                _ => None,
            })
            .collect()
    }

    /// `(channel_id, text)` pairs passed to `post_message`.
    pub async fn posted(&self) -> Vec<(String, String)> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::Post { channel_id, text } => Some((channel_id, text)),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: GatewayCall) -> Result<(), SlackrError> {
        let mut state = self.state.lock().await;
        state.calls.push(call.clone());
        if state.fail_on.as_ref() == Some(&call) {
            state.fail_on = None;
            return Err(SlackrError::gateway(format!("injected failure on {call:?}")));
        }
        // An archived channel drops out of the non-archived listing.
        if let GatewayCall::Archive { channel_id } = &call {
            state.channels.retain(|c| &c.id != channel_id);
        }
        Ok(())
    }
}

#[async_trait]
impl ChannelGateway for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_non_archived_channels(&self) -> Result<Vec<ChannelRef>, SlackrError> {
        self.record(GatewayCall::ListChannels).await?;
        Ok(self.state.lock().await.channels.clone())
    }

    async fn fetch_recent_messages(
        &self,
        channel_id: &str,
        count: usize,
    ) -> Result<Vec<Message>, SlackrError> {
        self.record(GatewayCall::FetchHistory {
            channel_id: channel_id.to_string(),
            count,
        })
        .await?;
        let state = self.state.lock().await;
        Ok(state
            .history
            .get(channel_id)
            .map(|h| h.iter().take(count).cloned().collect())
            .unwrap_or_default())
    }

    async fn archive_channel(&self, channel_id: &str) -> Result<(), SlackrError> {
        self.record(GatewayCall::Archive {
            channel_id: channel_id.to_string(),
        })
        .await
    }

    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), SlackrError> {
        self.record(GatewayCall::Post {
            channel_id: channel_id.to_string(),
            text: text.to_string(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::message;
    use chrono::Utc;

    #[tokio::test]
    async fn records_calls_and_truncates_history() {
        let gw = MockGateway::new();
        let now = Utc::now();
        gw.add_channel("C1", "general", vec![message(now, "a"), message(now, "b")])
            .await;

        assert_eq!(gw.list_non_archived_channels().await.unwrap().len(), 1);
        assert_eq!(gw.fetch_recent_messages("C1", 1).await.unwrap().len(), 1);
        assert!(gw.fetch_recent_messages("C404", 3).await.unwrap().is_empty());
        assert_eq!(gw.calls().await.len(), 3);
    }

    #[tokio::test]
    async fn injected_failure_fires_once() {
        let gw = MockGateway::new();
        gw.fail_on(GatewayCall::Archive {
            channel_id: "C1".into(),
        })
        .await;

        assert!(gw.archive_channel("C1").await.is_err());
        assert!(gw.archive_channel("C1").await.is_ok());
    }

    #[tokio::test]
    async fn archived_channel_leaves_listing() {
        let gw = MockGateway::new();
        gw.add_channel("C1", "old", vec![]).await;
        gw.archive_channel("C1").await.unwrap();
        assert!(gw.list_non_archived_channels().await.unwrap().is_empty());
        assert_eq!(gw.archived().await, vec!["C1".to_string()]);
    }
}
