// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture builders.

use chrono::{DateTime, Duration, Utc};

use slackr_core::{ChannelRecord, ChannelRef, ChannelSnapshot, Message};

/// A plain user message with no subtype or author.
pub fn message(timestamp: DateTime<Utc>, text: &str) -> Message {
    Message {
        timestamp,
        text: text.to_string(),
        subtype: None,
        author: None,
    }
}

/// A listed ledger record.
pub fn record(id: &str, name: &str, last_active_at: DateTime<Utc>) -> ChannelRecord {
    ChannelRecord {
        channel_id: id.to_string(),
        channel_name: name.to_string(),
        last_active_at,
        listed: true,
    }
}

pub fn snapshot(id: &str, name: &str, recent_messages: Vec<Message>) -> ChannelSnapshot {
    ChannelSnapshot {
        channel: ChannelRef::new(id, name),
        recent_messages,
    }
}

/// `now` minus whole days.
pub fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}
