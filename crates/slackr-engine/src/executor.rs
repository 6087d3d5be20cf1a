// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Side effects for a classified ledger.
//!
//! The run mode decides what is allowed: `Dry` only reports, `Notify` warns
//! channels in the Notify bucket, `Active` archives channels in the
//! ToArchive bucket and posts a closing message. The first gateway failure
//! aborts the run; actions already performed stay performed, and every
//! archive that succeeded has its audit entry.

use chrono::{DateTime, Utc};
use slackr_config::model::ArchiverConfig;
use slackr_core::{AuditSink, ChannelGateway, RunMode, SlackrError};
use tracing::info;

use crate::classify::Classification;

/// Placeholder in the notify text replaced with the archive threshold.
pub const ARCHIVE_AFTER_DAYS_PLACEHOLDER: &str = "{archive_after_days}";

/// Totals and channel names for one archiver run.
///
/// In `Dry` mode the name lists hold what *would* have been archived or
/// notified; otherwise they hold what was actually done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSummary {
    pub mode: RunMode,
    pub active_count: usize,
    pub archived_count: usize,
    pub notified_count: usize,
    pub archived: Vec<String>,
    pub notified: Vec<String>,
}

impl ActionSummary {
    fn new(mode: RunMode, classification: &Classification) -> Self {
        Self {
            mode,
            active_count: classification.active.len(),
            archived_count: 0,
            notified_count: 0,
            archived: Vec::new(),
            notified: Vec::new(),
        }
    }
}

/// Performs notify and archive actions with fixed message texts.
#[derive(Debug, Clone)]
pub struct ActionExecutor {
    notify_message: String,
    archive_message: String,
}

impl ActionExecutor {
    pub fn new(notify_message: impl Into<String>, archive_message: impl Into<String>) -> Self {
        Self {
            notify_message: notify_message.into(),
            archive_message: archive_message.into(),
        }
    }

    /// Builds the executor from `[archiver]`, filling in the threshold.
    pub fn from_config(config: &ArchiverConfig) -> Self {
        let notify = config.notify_message.replace(
            ARCHIVE_AFTER_DAYS_PLACEHOLDER,
            &config.archive_after_days.to_string(),
        );
        Self::new(notify, config.archive_message.clone())
    }

    pub fn notify_message(&self) -> &str {
        &self.notify_message
    }

    pub fn archive_message(&self) -> &str {
        &self.archive_message
    }

    /// Runs the actions `mode` permits. `run_at` stamps every audit entry.
    pub async fn execute<G, A>(
        &self,
        mode: RunMode,
        classification: &Classification,
        gateway: &G,
        audit: &mut A,
        run_at: DateTime<Utc>,
    ) -> Result<ActionSummary, SlackrError>
    where
        G: ChannelGateway + ?Sized,
        A: AuditSink + ?Sized,
    {
        let mut summary = ActionSummary::new(mode, classification);

        match mode {
            RunMode::Dry => {
                summary.archived = names(&classification.to_archive);
                summary.notified = names(&classification.notify);
                summary.archived_count = summary.archived.len();
                summary.notified_count = summary.notified.len();
                info!(
                    would_archive = summary.archived_count,
                    would_notify = summary.notified_count,
                    "dry run, no channels will be archived"
                );
            }
            RunMode::Notify => {
                for channel in &classification.notify {
                    gateway.post_message(&channel.id, &self.notify_message).await?;
                    info!(channel = %channel.name, "notified channel it is marked for archival");
                    summary.notified.push(channel.name.clone());
                    summary.notified_count += 1;
                }
            }
            RunMode::Active => {
                for channel in &classification.to_archive {
                    gateway.archive_channel(&channel.id).await?;
                    // The archive is done; record it before anything else can fail.
                    audit.append_archive_entry(&channel.name, run_at)?;
                    info!(channel = %channel.name, "channel archived");
                    gateway.post_message(&channel.id, &self.archive_message).await?;
                    summary.archived.push(channel.name.clone());
                    summary.archived_count += 1;
                }
            }
        }

        Ok(summary)
    }
}

fn names(channels: &[slackr_core::ChannelRef]) -> Vec<String> {
    channels.iter().map(|c| c.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use slackr_core::ChannelRef;
    use slackr_test_utils::{GatewayCall, MemoryAuditSink, MockGateway};

    fn run_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    fn classification() -> Classification {
        Classification {
            active: vec![ChannelRef::new("C1", "general"), ChannelRef::new("C2", "proj-x")],
            notify: vec![ChannelRef::new("C2", "proj-x")],
            to_archive: vec![ChannelRef::new("C3", "old-a"), ChannelRef::new("C4", "old-b")],
            unlisted: 0,
        }
    }

    fn executor() -> ActionExecutor {
        ActionExecutor::new("warning", "goodbye")
    }

    #[test]
    fn from_config_substitutes_threshold() {
        let config = ArchiverConfig {
            archive_after_days: 90,
            notify_message: "archived in {archive_after_days} days".into(),
            ..ArchiverConfig::default()
        };
        let exec = ActionExecutor::from_config(&config);
        assert_eq!(exec.notify_message(), "archived in 90 days");
    }

    #[tokio::test]
    async fn dry_mode_makes_no_calls() {
        let gw = MockGateway::new();
        let mut audit = MemoryAuditSink::new();
        let summary = executor()
            .execute(RunMode::Dry, &classification(), &gw, &mut audit, run_at())
            .await
            .unwrap();

        assert!(gw.calls().await.is_empty());
        assert!(audit.entries.is_empty());
        assert_eq!(summary.active_count, 2);
        assert_eq!(summary.archived, vec!["old-a", "old-b"]);
        assert_eq!(summary.notified, vec!["proj-x"]);
    }

    #[tokio::test]
    async fn notify_mode_posts_once_per_notify_channel() {
        let gw = MockGateway::new();
        let mut audit = MemoryAuditSink::new();
        let summary = executor()
            .execute(RunMode::Notify, &classification(), &gw, &mut audit, run_at())
            .await
            .unwrap();

        assert_eq!(gw.posted().await, vec![("C2".to_string(), "warning".to_string())]);
        assert!(gw.archived().await.is_empty());
        assert!(audit.entries.is_empty());
        assert_eq!(summary.notified_count, 1);
        assert_eq!(summary.archived_count, 0);
    }

    #[tokio::test]
    async fn active_mode_archives_posts_and_audits_each_channel() {
        let gw = MockGateway::new();
        let mut audit = MemoryAuditSink::new();
        let summary = executor()
            .execute(RunMode::Active, &classification(), &gw, &mut audit, run_at())
            .await
            .unwrap();

        assert_eq!(
            gw.calls().await,
            vec![
                GatewayCall::Archive { channel_id: "C3".into() },
                GatewayCall::Post { channel_id: "C3".into(), text: "goodbye".into() },
                GatewayCall::Archive { channel_id: "C4".into() },
                GatewayCall::Post { channel_id: "C4".into(), text: "goodbye".into() },
            ]
        );
        assert_eq!(audit.names(), vec!["old-a", "old-b"]);
        assert!(audit.entries.iter().all(|e| e.archived_at == run_at()));
        assert_eq!(summary.archived_count, 2);
        assert_eq!(summary.notified_count, 0);
    }

    #[tokio::test]
    async fn gateway_failure_stops_the_loop() {
        let gw = MockGateway::new();
        gw.fail_on(GatewayCall::Archive { channel_id: "C4".into() }).await;
        let mut audit = MemoryAuditSink::new();

        let err = executor()
            .execute(RunMode::Active, &classification(), &gw, &mut audit, run_at())
            .await
            .unwrap_err();

        assert!(matches!(err, SlackrError::Gateway { .. }));
        assert_eq!(audit.names(), vec!["old-a"]);
        assert_eq!(gw.calls().await.len(), 3);
    }

    #[tokio::test]
    async fn failed_closing_post_still_audits_the_archive() {
        let gw = MockGateway::new();
        gw.fail_on(GatewayCall::Post {
            channel_id: "C3".into(),
            text: "goodbye".into(),
        })
        .await;
        let mut audit = MemoryAuditSink::new();

        let err = executor()
            .execute(RunMode::Active, &classification(), &gw, &mut audit, run_at())
            .await
            .unwrap_err();

        assert!(matches!(err, SlackrError::Gateway { .. }));
        assert_eq!(gw.archived().await, vec!["C3"]);
        assert_eq!(audit.names(), vec!["old-a"]);
        assert_eq!(audit.entries[0].archived_at, run_at());
    }

    #[tokio::test]
    async fn notify_failure_stops_the_loop() {
        let mut classification = classification();
        classification.notify.push(ChannelRef::new("C5", "later"));
        let gw = MockGateway::new();
        gw.fail_on(GatewayCall::Post {
            channel_id: "C2".into(),
            text: "warning".into(),
        })
        .await;
        let mut audit = MemoryAuditSink::new();

        let err = executor()
            .execute(RunMode::Notify, &classification, &gw, &mut audit, run_at())
            .await
            .unwrap_err();

        assert!(matches!(err, SlackrError::Gateway { .. }));
        let calls = gw.calls().await;
        assert_eq!(calls.len(), 1);
        assert!(calls.iter().all(GatewayCall::is_mutating));
        assert!(audit.entries.is_empty());
    }
}
