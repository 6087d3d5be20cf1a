// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slack Web API response payloads.
//!
//! Only the fields Slackr reads are modelled; everything else is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use slackr_core::{ChannelRef, Message, SlackrError};

/// Envelope shared by every Web API response.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConversationsListResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub channels: Vec<ApiChannel>,
    #[serde(default)]
    pub response_metadata: Option<ResponseMetadata>,
}

impl ConversationsListResponse {
    /// Cursor for the next page, if any.
    pub fn next_cursor(&self) -> Option<&str> {
        self.response_metadata
            .as_ref()
            .map(|m| m.next_cursor.as_str())
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiChannel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_archived: bool,
}

impl From<ApiChannel> for ChannelRef {
    fn from(c: ApiChannel) -> Self {
        ChannelRef::new(c.id, c.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct ConversationsHistoryResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    pub ts: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl TryFrom<ApiMessage> for Message {
    type Error = SlackrError;

    fn try_from(m: ApiMessage) -> Result<Self, Self::Error> {
        let timestamp = parse_ts(&m.ts)
            .ok_or_else(|| SlackrError::gateway(format!("malformed message ts `{}`", m.ts)))?;
        Ok(Message {
            timestamp,
            text: m.text,
            subtype: m.subtype,
            author: m.username,
        })
    }
}

/// Parse a Slack `ts` (`"1503435956.000123"`) to whole-second precision.
pub fn parse_ts(ts: &str) -> Option<DateTime<Utc>> {
    let secs = ts.split('.').next()?.parse::<i64>().ok()?;
    DateTime::from_timestamp(secs, 0)
}
