// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle classification.
//!
//! Partitions ledger records into Active, Notify, and ToArchive buckets.
//! Inactivity is counted in calendar days in the caller's time zone, so a
//! record stamped at 23:59 is one day inactive at 00:01 the next day.

use chrono::{DateTime, TimeZone, Utc};
use slackr_config::model::ArchiverConfig;
use slackr_core::{Bucket, ChannelRecord, ChannelRef, SlackrError, Whitelist};
use tracing::{debug, info};

/// The two inactivity thresholds, with `notify < archive` enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    archive_after_days: i64,
    notify_after_days: i64,
}

impl Thresholds {
    pub fn new(archive_after_days: u32, notify_after_days: u32) -> Result<Self, SlackrError> {
        if archive_after_days == 0 {
            return Err(SlackrError::Config(
                "archive_after_days must be at least 1".into(),
            ));
        }
        if notify_after_days >= archive_after_days {
            return Err(SlackrError::Config(format!(
                "notify_after_days ({notify_after_days}) must be less than archive_after_days ({archive_after_days})"
            )));
        }
        Ok(Self {
            archive_after_days: i64::from(archive_after_days),
            notify_after_days: i64::from(notify_after_days),
        })
    }

    pub fn from_config(config: &ArchiverConfig) -> Result<Self, SlackrError> {
        Self::new(config.archive_after_days, config.notify_after_days)
    }

    pub fn archive_after_days(&self) -> i64 {
        self.archive_after_days
    }

    pub fn notify_after_days(&self) -> i64 {
        self.notify_after_days
    }

    /// Buckets for a channel with the given inactivity.
    ///
    /// Whitelisted channels are always `[Active]`. Otherwise a channel is
    /// `[ToArchive]` past the archive threshold, `[Active, Notify]` past the
    /// notify threshold, and `[Active]` below it.
    pub fn buckets(&self, days_inactive: i64, whitelisted: bool) -> &'static [Bucket] {
        if whitelisted {
            &[Bucket::Active]
        } else if days_inactive >= self.archive_after_days {
            &[Bucket::ToArchive]
        } else if days_inactive >= self.notify_after_days {
            &[Bucket::Active, Bucket::Notify]
        } else {
            &[Bucket::Active]
        }
    }
}

/// Whole calendar days between `last_active_at` and `now`, in `now`'s zone.
///
/// Timestamps in the future count as zero days.
pub fn days_inactive<Tz: TimeZone>(last_active_at: DateTime<Utc>, now: &DateTime<Tz>) -> i64 {
    let last = last_active_at.with_timezone(&now.timezone()).date_naive();
    (now.date_naive() - last).num_days().max(0)
}

/// Output of [`classify`]. Each list keeps ledger order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub active: Vec<ChannelRef>,
    pub notify: Vec<ChannelRef>,
    pub to_archive: Vec<ChannelRef>,
    /// Records skipped because the channel was absent from the last listing.
    pub unlisted: usize,
}

impl Classification {
    fn push(&mut self, bucket: Bucket, channel: ChannelRef) {
        match bucket {
            Bucket::Active => self.active.push(channel),
            Bucket::Notify => self.notify.push(channel),
            Bucket::ToArchive => self.to_archive.push(channel),
        }
    }
}

/// Classifies every listed record. Never mutates the ledger.
pub fn classify<Tz: TimeZone>(
    records: &[ChannelRecord],
    whitelist: &Whitelist,
    now: &DateTime<Tz>,
    thresholds: Thresholds,
) -> Classification {
    let mut out = Classification::default();

    for record in records {
        if !record.listed {
            debug!(channel = %record.channel_name, "skipping channel absent from last listing");
            out.unlisted += 1;
            continue;
        }

        let days = days_inactive(record.last_active_at, now);
        let whitelisted = whitelist.contains(&record.channel_name);
        let buckets = thresholds.buckets(days, whitelisted);

        if whitelisted {
            info!(channel = %record.channel_name, days_inactive = days, "whitelisted, active");
        } else if buckets.contains(&Bucket::ToArchive) {
            info!(channel = %record.channel_name, days_inactive = days, "[INACTIVE] to be archived");
        } else if buckets.contains(&Bucket::Notify) {
            info!(channel = %record.channel_name, days_inactive = days, "active, due for notice");
        } else {
            info!(channel = %record.channel_name, days_inactive = days, "active");
        }

        for &bucket in buckets {
            out.push(bucket, record.channel_ref());
        }
    }

    out
}
