// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote channel gateway trait (Slack Web API, mocks).

use async_trait::async_trait;

use crate::error::SlackrError;
use crate::types::{ChannelRef, Message};

/// Adapter for the remote chat workspace.
///
/// Every failure is reported as [`SlackrError::Gateway`] and is fatal to the
/// calling loop.
#[async_trait]
pub trait ChannelGateway: Send + Sync {
    /// Returns the human-readable name of this gateway.
    fn name(&self) -> &str;

    /// Lists every channel that is not archived.
    async fn list_non_archived_channels(&self) -> Result<Vec<ChannelRef>, SlackrError>;

    /// Fetches up to `count` of the channel's most recent messages, newest first.
    async fn fetch_recent_messages(
        &self,
        channel_id: &str,
        count: usize,
    ) -> Result<Vec<Message>, SlackrError>;

    /// Archives the channel.
    async fn archive_channel(&self, channel_id: &str) -> Result<(), SlackrError>;

    /// Posts a plain-text message to the channel.
    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), SlackrError>;
}
