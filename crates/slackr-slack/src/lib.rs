// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slack implementation of the [`ChannelGateway`] trait.
//!
//! Uses the `conversations.*` and `chat.postMessage` Web API methods with a
//! bot or user token. Only public, non-archived channels are listed.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::json;
use slackr_config::model::SlackConfig;
use slackr_core::{ChannelGateway, ChannelRef, Message, SlackrError};
use tracing::{debug, info};

use crate::client::{SlackClient, check_ok};
use crate::types::{ApiEnvelope, ConversationsHistoryResponse, ConversationsListResponse};

/// Slack Web API channel gateway.
#[derive(Debug)]
pub struct SlackGateway {
    client: SlackClient,
    page_size: u32,
}

impl SlackGateway {
    /// Creates a gateway from the `[slack]` config section and an API token.
    pub fn new(config: &SlackConfig, token: SecretString) -> Result<Self, SlackrError> {
        let client = SlackClient::new(
            &config.api_base,
            token,
            Duration::from_secs(config.request_timeout_secs.max(1)),
        )?;
        Ok(Self {
            client,
            page_size: config.list_page_size.max(1),
        })
    }
}

#[async_trait]
impl ChannelGateway for SlackGateway {
    fn name(&self) -> &str {
        "slack"
    }

    async fn list_non_archived_channels(&self) -> Result<Vec<ChannelRef>, SlackrError> {
        let limit = self.page_size.to_string();
        let mut cursor: Option<String> = None;
        let mut channels = Vec::new();

        loop {
            let mut params = vec![
                ("exclude_archived", "true"),
                ("types", "public_channel"),
                ("limit", limit.as_str()),
            ];
            if let Some(c) = cursor.as_deref() {
                params.push(("cursor", c));
            }

            let page: ConversationsListResponse =
                self.client.get("conversations.list", &params).await?;
            check_ok("conversations.list", page.ok, page.error.as_deref())?;

            let next = page.next_cursor().map(str::to_string);
            channels.extend(
                page.channels
                    .into_iter()
                    .filter(|c| !c.is_archived)
                    .map(ChannelRef::from),
            );

            match next {
                Some(next) => {
                    debug!(fetched = channels.len(), "conversations.list has more pages");
                    cursor = Some(next);
                }
                None => break,
            }
        }

        info!(count = channels.len(), "listed non-archived channels");
        Ok(channels)
    }

    async fn fetch_recent_messages(
        &self,
        channel_id: &str,
        count: usize,
    ) -> Result<Vec<Message>, SlackrError> {
        let limit = count.to_string();
        let history: ConversationsHistoryResponse = self
            .client
            .get(
                "conversations.history",
                &[("channel", channel_id), ("limit", limit.as_str())],
            )
            .await?;
        check_ok("conversations.history", history.ok, history.error.as_deref())?;

        // Slack may return more than `limit` when threads are inlined.
        history
            .messages
            .into_iter()
            .take(count)
            .map(Message::try_from)
            .collect()
    }

    async fn archive_channel(&self, channel_id: &str) -> Result<(), SlackrError> {
        let resp: ApiEnvelope = self
            .client
            .post("conversations.archive", &json!({ "channel": channel_id }))
            .await?;
        check_ok("conversations.archive", resp.ok, resp.error.as_deref())
    }

    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), SlackrError> {
        let resp: ApiEnvelope = self
            .client
            .post(
                "chat.postMessage",
                &json!({
                    "channel": channel_id,
                    "text": text,
                    "unfurl_links": false,
                    "unfurl_media": false,
                }),
            )
            .await?;
        check_ok("chat.postMessage", resp.ok, resp.error.as_deref())
    }
}
