// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The recon phase: sample every channel and rewrite the ledger.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use slackr_config::model::ReconConfig;
use slackr_core::{ChannelGateway, ChannelSnapshot, Ledger, LedgerStore, SlackrError};
use tracing::{info, warn};

use crate::reconcile::{ReconOutcome, ReconPolicy, reconcile};

/// Counters for one recon run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconReport {
    /// Channels returned by the listing and reconciled.
    pub processed: usize,
    pub active: usize,
    pub idle: usize,
    pub new: usize,
    /// Ledger records for channels missing from this run's listing.
    pub unlisted: usize,
}

impl ReconReport {
    fn count(&mut self, outcome: ReconOutcome) {
        self.processed += 1;
        match outcome {
            ReconOutcome::ActiveNow => self.active += 1,
            ReconOutcome::IdleCarriedForward => self.idle += 1,
            ReconOutcome::New => self.new += 1,
        }
    }
}

/// Drives one recon pass over a gateway and a ledger store.
#[derive(Debug, Clone)]
pub struct ReconRunner {
    policy: ReconPolicy,
    history_count: usize,
}

impl ReconRunner {
    pub fn new(policy: ReconPolicy, history_count: usize) -> Self {
        Self {
            policy,
            history_count,
        }
    }

    pub fn from_config(config: &ReconConfig) -> Self {
        Self::new(ReconPolicy::from_config(config), config.history_count)
    }

    /// Reconciles every non-archived channel and saves the ledger once.
    ///
    /// A missing ledger is treated as "no prior data". Any gateway or
    /// storage failure aborts before the ledger is written.
    pub async fn run<G, L>(
        &self,
        gateway: &G,
        store: &L,
        now: DateTime<Utc>,
    ) -> Result<ReconReport, SlackrError>
    where
        G: ChannelGateway + ?Sized,
        L: LedgerStore + ?Sized,
    {
        let prior = match store.load_ledger()? {
            Some(ledger) => {
                info!(records = ledger.len(), "loaded existing ledger");
                ledger
            }
            None => {
                info!("no existing ledger, starting fresh");
                Ledger::new()
            }
        };

        let channels = gateway.list_non_archived_channels().await?;
        info!(count = channels.len(), gateway = gateway.name(), "collecting channel activity");

        let mut ledger = prior.clone();
        let mut seen = HashSet::with_capacity(channels.len());
        let mut report = ReconReport::default();

        for channel in channels {
            if !seen.insert(channel.id.clone()) {
                warn!(channel_id = %channel.id, "channel listed twice, skipping duplicate");
                continue;
            }

            let recent_messages = gateway
                .fetch_recent_messages(&channel.id, self.history_count)
                .await?;
            let snapshot = ChannelSnapshot {
                channel,
                recent_messages,
            };

            let reconciled = reconcile(
                &snapshot,
                prior.get(&snapshot.channel.id),
                now,
                &self.policy,
            );
            info!(
                channel = %reconciled.record.channel_name,
                last_active = %reconciled.record.last_active_at,
                "[{}]",
                reconciled.outcome
            );
            report.count(reconciled.outcome);
            ledger.upsert(reconciled.record);
        }

        let gone: Vec<_> = ledger
            .records()
            .iter()
            .filter(|r| !seen.contains(&r.channel_id))
            .cloned()
            .collect();
        for mut record in gone {
            if record.listed {
                info!(channel = %record.channel_name, "channel no longer listed, retaining record");
            }
            record.listed = false;
            ledger.upsert(record);
            report.unlisted += 1;
        }

        store.save_ledger(&ledger)?;
        info!(
            processed = report.processed,
            active = report.active,
            idle = report.idle,
            new = report.new,
            unlisted = report.unlisted,
            "recon complete"
        );
        Ok(report)
    }
}
