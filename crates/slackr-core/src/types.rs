// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data model shared by the recon and archiver phases.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::SlackrError;

/// A channel as returned by the non-archived channel listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelRef {
    pub id: String,
    pub name: String,
}

impl ChannelRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A single channel message, used only to derive activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    /// Event subtype (`channel_join`, `bot_message`, ...). `None` for plain user messages.
    pub subtype: Option<String>,
    /// Display name of the poster, when the platform reports one.
    pub author: Option<String>,
}

/// Per-run view of one channel: its identity plus its most recent messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub channel: ChannelRef,
    pub recent_messages: Vec<Message>,
}

/// The persisted ledger entry for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub channel_id: String,
    pub channel_name: String,
    pub last_active_at: DateTime<Utc>,
    /// Whether the channel appeared in the most recent non-archived listing.
    pub listed: bool,
}

impl ChannelRecord {
    pub fn channel_ref(&self) -> ChannelRef {
        ChannelRef::new(&self.channel_id, &self.channel_name)
    }
}

/// Ordered set of [`ChannelRecord`]s keyed by channel id.
///
/// Insertion order is preserved; at most one record exists per channel id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<ChannelRecord>,
    index: HashMap<String, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from loaded records, rejecting duplicate channel ids.
    pub fn from_records(records: Vec<ChannelRecord>) -> Result<Self, SlackrError> {
        let mut ledger = Self::new();
        for record in records {
            if ledger.index.contains_key(&record.channel_id) {
                return Err(SlackrError::data(format!(
                    "duplicate ledger entry for channel id `{}`",
                    record.channel_id
                )));
            }
            ledger.upsert(record);
        }
        Ok(ledger)
    }

    /// Insert a record, or replace the existing record with the same id in place.
    pub fn upsert(&mut self, record: ChannelRecord) {
        match self.index.get(&record.channel_id) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.index.insert(record.channel_id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, channel_id: &str) -> Option<&ChannelRecord> {
        self.index.get(channel_id).map(|&pos| &self.records[pos])
    }

    pub fn records(&self) -> &[ChannelRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ChannelRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Channel names exempt from archival. Membership is exact name match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist(HashSet<String>);

impl Whitelist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, channel_name: &str) -> bool {
        self.0.contains(channel_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Whitelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Operator-selected archiver mode, fixed for the whole run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RunMode {
    /// Report only; no remote calls.
    Dry,
    /// Post a warning to channels in the Notify bucket.
    Notify,
    /// Archive channels in the ToArchive bucket and post a closing message.
    Active,
}

/// Classification outcome for a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Bucket {
    Active,
    Notify,
    ToArchive,
}

/// Append-only record of one successful archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveAuditEntry {
    pub channel_name: String,
    pub archived_at: DateTime<Utc>,
}
