// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Slackr channel archiver.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Slackr configuration.
///
/// Every section is optional and defaults to the values the archiver has
/// always shipped with.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SlackrConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Ledger, whitelist, and audit log locations.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Slack Web API settings.
    #[serde(default)]
    pub slack: SlackConfig,

    /// Recon phase settings.
    #[serde(default)]
    pub recon: ReconConfig,

    /// Archiver phase settings.
    #[serde(default)]
    pub archiver: ArchiverConfig,
}

/// Process-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// File locations shared by both phases.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// CSV ledger of channel last-active dates. The previous copy is kept at `<path>.last`.
    #[serde(default = "default_ledger_path")]
    pub ledger_path: String,

    /// Channel names exempt from archival, one per line after a header.
    #[serde(default = "default_whitelist_path")]
    pub whitelist_path: String,

    /// Append-only history of archived channels.
    #[serde(default = "default_audit_log_path")]
    pub audit_log_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            ledger_path: default_ledger_path(),
            whitelist_path: default_whitelist_path(),
            audit_log_path: default_audit_log_path(),
        }
    }
}

fn default_ledger_path() -> String {
    "slackr_channels.db".to_string()
}

fn default_whitelist_path() -> String {
    "whitelist.txt".to_string()
}

fn default_audit_log_path() -> String {
    "slackr_archived_channels.log".to_string()
}

/// Slack Web API configuration. The token itself is never stored here; see
/// [`crate::credential`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SlackConfig {
    /// Base URL of the Web API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Page size for `conversations.list`.
    #[serde(default = "default_list_page_size")]
    pub list_page_size: u32,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
            list_page_size: default_list_page_size(),
        }
    }
}

fn default_api_base() -> String {
    "https://slack.com/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_list_page_size() -> u32 {
    200
}

/// Recon phase configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    /// Number of most recent messages sampled per channel.
    #[serde(default = "default_history_count")]
    pub history_count: usize,

    /// Rolling window (hours) inside which a message counts as fresh activity.
    #[serde(default = "default_recent_window_hours")]
    pub recent_window_hours: u32,

    /// Minimum interval between successive Slack calls, in milliseconds.
    #[serde(default = "default_recon_call_interval_ms")]
    pub call_interval_ms: u64,

    /// Message subtypes that never count as activity.
    #[serde(default = "default_subtype_blacklist")]
    pub subtype_blacklist: Vec<String>,

    /// Authors whose messages never count as activity.
    #[serde(default = "default_author_blacklist")]
    pub author_blacklist: Vec<String>,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            history_count: default_history_count(),
            recent_window_hours: default_recent_window_hours(),
            call_interval_ms: default_recon_call_interval_ms(),
            subtype_blacklist: default_subtype_blacklist(),
            author_blacklist: default_author_blacklist(),
        }
    }
}

fn default_history_count() -> usize {
    3
}

fn default_recent_window_hours() -> u32 {
    48
}

fn default_recon_call_interval_ms() -> u64 {
    1500
}

fn default_subtype_blacklist() -> Vec<String> {
    [
        "channel_leave",
        "channel_join",
        "channel_name",
        "channel_unarchive",
        "channel_purpose",
        "channel_topic",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_author_blacklist() -> Vec<String> {
    vec!["Slackr-Archiver".to_string()]
}

/// Archiver phase configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiverConfig {
    /// Calendar days of inactivity after which a channel is archived.
    #[serde(default = "default_archive_after_days")]
    pub archive_after_days: u32,

    /// Calendar days of inactivity after which a channel is warned. Must be
    /// lower than `archive_after_days`.
    #[serde(default = "default_notify_after_days")]
    pub notify_after_days: u32,

    /// Minimum interval between successive Slack calls, in milliseconds.
    #[serde(default = "default_archiver_call_interval_ms")]
    pub call_interval_ms: u64,

    /// Warning posted in notify mode. `{archive_after_days}` is substituted.
    #[serde(default = "default_notify_message")]
    pub notify_message: String,

    /// Closing message posted after archiving.
    #[serde(default = "default_archive_message")]
    pub archive_message: String,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            archive_after_days: default_archive_after_days(),
            notify_after_days: default_notify_after_days(),
            call_interval_ms: default_archiver_call_interval_ms(),
            notify_message: default_notify_message(),
            archive_message: default_archive_message(),
        }
    }
}

fn default_archive_after_days() -> u32 {
    60
}

fn default_notify_after_days() -> u32 {
    30
}

fn default_archiver_call_interval_ms() -> u64 {
    1000
}

fn default_notify_message() -> String {
    "Hello! This channel looks like it hasn't been used in a while! Please note that it is \
     now marked to be archived in {archive_after_days} days. Please contact IT to request \
     this channel be whitelisted if you want to keep it."
        .to_string()
}

fn default_archive_message() -> String {
    "Hello! This channel has been inactive for a long time and has been archived. Please \
     contact IT with any questions or unarchive requests."
        .to_string()
}
