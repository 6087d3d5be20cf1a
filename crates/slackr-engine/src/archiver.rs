// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The archiver phase: classify the ledger and act on it.
//!
//! Each run walks `Start -> LedgerLoaded -> Classified -> {DryReport |
//! NotifyLoop | ArchiveLoop} -> Summarized`. Nothing is checkpointed: a run
//! that aborts mid-loop is simply rerun, and channels archived before the
//! failure drop out of the next recon listing.

use chrono::{DateTime, TimeZone, Utc};
use slackr_config::model::ArchiverConfig;
use slackr_core::{
    AuditSink, ChannelGateway, LedgerStore, RunMode, SlackrError, WhitelistStore,
};
use strum::Display;
use tracing::info;

use crate::classify::{Classification, Thresholds, classify};
use crate::executor::{ActionExecutor, ActionSummary};

/// Stages of an archiver run, as reported in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RunPhase {
    Start,
    LedgerLoaded,
    Classified,
    DryReport,
    NotifyLoop,
    ArchiveLoop,
    Summarized,
}

impl RunPhase {
    /// The action phase entered for `mode`.
    pub fn for_mode(mode: RunMode) -> Self {
        match mode {
            RunMode::Dry => Self::DryReport,
            RunMode::Notify => Self::NotifyLoop,
            RunMode::Active => Self::ArchiveLoop,
        }
    }
}

/// Everything an archiver run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub classification: Classification,
    pub summary: ActionSummary,
}

/// Drives one archiver pass.
#[derive(Debug, Clone)]
pub struct ArchiveRunner {
    thresholds: Thresholds,
    executor: ActionExecutor,
}

impl ArchiveRunner {
    pub fn new(thresholds: Thresholds, executor: ActionExecutor) -> Self {
        Self {
            thresholds,
            executor,
        }
    }

    pub fn from_config(config: &ArchiverConfig) -> Result<Self, SlackrError> {
        Ok(Self::new(
            Thresholds::from_config(config)?,
            ActionExecutor::from_config(config),
        ))
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Runs the archiver in `mode` at wall-clock time `now`.
    ///
    /// Days inactive are counted in `now`'s time zone; audit entries are
    /// stamped with `now` in UTC. A missing ledger is a configuration error.
    pub async fn run<Tz, G, L, W, A>(
        &self,
        mode: RunMode,
        gateway: &G,
        ledger_store: &L,
        whitelist_store: &W,
        audit: &mut A,
        now: &DateTime<Tz>,
    ) -> Result<ArchiveReport, SlackrError>
    where
        Tz: TimeZone,
        G: ChannelGateway + ?Sized,
        L: LedgerStore + ?Sized,
        W: WhitelistStore + ?Sized,
        A: AuditSink + ?Sized,
    {
        info!(phase = %RunPhase::Start, %mode, "beginning archiver run");

        let ledger = ledger_store.load_ledger()?.ok_or_else(|| {
            SlackrError::Config("no channel ledger found; run `slackr recon` first".into())
        })?;
        let whitelist = whitelist_store.load_whitelist()?;
        info!(
            phase = %RunPhase::LedgerLoaded,
            records = ledger.len(),
            whitelisted = whitelist.len(),
            "data loaded"
        );

        info!(
            archive_after_days = self.thresholds.archive_after_days(),
            notify_after_days = self.thresholds.notify_after_days(),
            "checking for inactive channels"
        );
        let classification = classify(ledger.records(), &whitelist, now, self.thresholds);
        info!(
            phase = %RunPhase::Classified,
            active = classification.active.len(),
            notify = classification.notify.len(),
            to_archive = classification.to_archive.len(),
            "processing complete"
        );

        info!(phase = %RunPhase::for_mode(mode), "performing actions");
        let run_at = now.with_timezone(&Utc);
        let summary = self
            .executor
            .execute(mode, &classification, gateway, audit, run_at)
            .await?;

        info!(
            phase = %RunPhase::Summarized,
            archived = summary.archived_count,
            notified = summary.notified_count,
            "archiver run finished"
        );
        Ok(ArchiveReport {
            classification,
            summary,
        })
    }
}
