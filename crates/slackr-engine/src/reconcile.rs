// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Activity reconciliation.
//!
//! Merges a channel's freshly sampled messages with its prior ledger record
//! to produce the record to persist. Pure: no I/O and no hidden state.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use slackr_config::model::ReconConfig;
use slackr_core::{ChannelRecord, ChannelSnapshot, Message};
use strum::Display;

/// Filters applied to sampled messages before they count as activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconPolicy {
    /// Only messages within `[now - recent_window, now]` count.
    pub recent_window: Duration,
    /// Event subtypes that never count (joins, topic changes, ...).
    pub subtype_blacklist: HashSet<String>,
    /// Authors whose messages never count, typically the archiver's own bot.
    pub author_blacklist: HashSet<String>,
}

impl ReconPolicy {
    pub fn from_config(config: &ReconConfig) -> Self {
        Self {
            recent_window: Duration::hours(i64::from(config.recent_window_hours)),
            subtype_blacklist: config.subtype_blacklist.iter().cloned().collect(),
            author_blacklist: config.author_blacklist.iter().cloned().collect(),
        }
    }

    /// Earliest timestamp inside the window, clamped to the representable range.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.recent_window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether `message` is a genuine activity signal at `now`.
    pub fn counts(&self, message: &Message, now: DateTime<Utc>) -> bool {
        if message
            .author
            .as_ref()
            .is_some_and(|a| self.author_blacklist.contains(a))
        {
            return false;
        }
        if message
            .subtype
            .as_ref()
            .is_some_and(|s| self.subtype_blacklist.contains(s))
        {
            return false;
        }
        message.timestamp >= self.window_start(now) && message.timestamp <= now
    }
}

/// How the reconciled `last_active_at` was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ReconOutcome {
    /// Fresh activity inside the recent window.
    #[strum(serialize = "ACTIVE")]
    ActiveNow,
    /// No fresh activity; the prior date was carried forward.
    #[strum(serialize = "IDLE")]
    IdleCarriedForward,
    /// First sighting with no fresh activity; stamped with `now`.
    New,
}

/// Result of reconciling one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub record: ChannelRecord,
    pub outcome: ReconOutcome,
}

/// Computes the updated ledger record for `snapshot`.
///
/// The returned `last_active_at` never moves backwards relative to `prior`.
/// The channel name is taken from the snapshot so renames are picked up.
pub fn reconcile(
    snapshot: &ChannelSnapshot,
    prior: Option<&ChannelRecord>,
    now: DateTime<Utc>,
    policy: &ReconPolicy,
) -> Reconciled {
    let newest = snapshot
        .recent_messages
        .iter()
        .filter(|m| policy.counts(m, now))
        .map(|m| m.timestamp)
        .max();

    let (last_active_at, outcome) = match (newest, prior) {
        (Some(ts), Some(p)) => (ts.max(p.last_active_at), ReconOutcome::ActiveNow),
        (Some(ts), None) => (ts, ReconOutcome::ActiveNow),
        (None, Some(p)) => (p.last_active_at, ReconOutcome::IdleCarriedForward),
        (None, None) => (now, ReconOutcome::New),
    };

    Reconciled {
        record: ChannelRecord {
            channel_id: snapshot.channel.id.clone(),
            channel_name: snapshot.channel.name.clone(),
            last_active_at,
            listed: true,
        },
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use slackr_test_utils::{days_ago, message, record, snapshot};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    fn policy() -> ReconPolicy {
        ReconPolicy::from_config(&ReconConfig::default())
    }

    fn with_subtype(ts: DateTime<Utc>, subtype: &str) -> Message {
        Message {
            subtype: Some(subtype.into()),
            ..message(ts, "joined")
        }
    }

    fn with_author(ts: DateTime<Utc>, author: &str) -> Message {
        Message {
            author: Some(author.into()),
            ..message(ts, "notice")
        }
    }

    #[test]
    fn fresh_messages_without_prior_use_newest_timestamp() {
        let newer = now() - Duration::hours(2);
        let older = now() - Duration::hours(30);
        let snap = snapshot(
            "C1",
            "general",
            vec![message(newer, "hi"), message(older, "earlier")],
        );

        let out = reconcile(&snap, None, now(), &policy());
        assert_eq!(out.outcome, ReconOutcome::ActiveNow);
        assert_eq!(out.record.last_active_at, newer);
        assert_ne!(out.record.last_active_at, now());
    }

    #[test]
    fn idle_channel_carries_prior_date_forward() {
        let prior = record("C1", "general", days_ago(now(), 20));
        let snap = snapshot("C1", "general", vec![message(days_ago(now(), 20), "old")]);

        let out = reconcile(&snap, Some(&prior), now(), &policy());
        assert_eq!(out.outcome, ReconOutcome::IdleCarriedForward);
        assert_eq!(out.record.last_active_at, prior.last_active_at);
    }

    #[test]
    fn new_channel_without_activity_gets_now() {
        let snap = snapshot("C9", "brand-new", vec![]);
        let out = reconcile(&snap, None, now(), &policy());
        assert_eq!(out.outcome, ReconOutcome::New);
        assert_eq!(out.record.last_active_at, now());
        assert!(out.record.listed);
    }

    #[test]
    fn blacklisted_subtypes_and_authors_are_ignored() {
        let prior = record("C1", "general", days_ago(now(), 10));
        let recent = now() - Duration::hours(1);
        let snap = snapshot(
            "C1",
            "general",
            vec![
                with_subtype(recent, "channel_join"),
                with_author(recent, "Slackr-Archiver"),
            ],
        );

        let out = reconcile(&snap, Some(&prior), now(), &policy());
        assert_eq!(out.outcome, ReconOutcome::IdleCarriedForward);
        assert_eq!(out.record.last_active_at, prior.last_active_at);
    }

    #[test]
    fn unlisted_subtypes_still_count() {
        let recent = now() - Duration::hours(1);
        let snap = snapshot("C1", "general", vec![with_subtype(recent, "bot_message")]);
        let out = reconcile(&snap, None, now(), &policy());
        assert_eq!(out.outcome, ReconOutcome::ActiveNow);
        assert_eq!(out.record.last_active_at, recent);
    }

    #[test]
    fn window_is_inclusive_at_both_ends() {
        let p = policy();
        let edge = now() - Duration::hours(48);
        assert!(p.counts(&message(edge, "edge"), now()));
        assert!(p.counts(&message(now(), "now"), now()));
        assert!(!p.counts(&message(edge - Duration::seconds(1), "late"), now()));
        assert!(!p.counts(&message(now() + Duration::seconds(1), "future"), now()));
    }

    #[test]
    fn oversized_window_clamps_instead_of_overflowing() {
        let p = ReconPolicy::from_config(&ReconConfig {
            recent_window_hours: u32::MAX,
            ..ReconConfig::default()
        });
        assert_eq!(p.window_start(now()), DateTime::<Utc>::MIN_UTC);
        assert!(p.counts(&message(days_ago(now(), 10_000), "ancient"), now()));
    }

    #[test]
    fn last_active_never_moves_backwards() {
        let prior_ts = now() - Duration::hours(1);
        let prior = record("C1", "general", prior_ts);
        let snap = snapshot(
            "C1",
            "general",
            vec![message(now() - Duration::hours(5), "older than ledger")],
        );

        let out = reconcile(&snap, Some(&prior), now(), &policy());
        assert_eq!(out.outcome, ReconOutcome::ActiveNow);
        assert_eq!(out.record.last_active_at, prior_ts);
    }

    #[test]
    fn rename_is_picked_up_and_unlisted_flag_cleared() {
        let mut prior = record("C1", "old-name", days_ago(now(), 3));
        prior.listed = false;
        let snap = snapshot("C1", "new-name", vec![]);

        let out = reconcile(&snap, Some(&prior), now(), &policy());
        assert_eq!(out.record.channel_name, "new-name");
        assert!(out.record.listed);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let prior = record("C1", "general", days_ago(now(), 7));
        let snap = snapshot(
            "C1",
            "general",
            vec![message(now() - Duration::hours(3), "x")],
        );
        let first = reconcile(&snap, Some(&prior), now(), &policy());
        let second = reconcile(&snap, Some(&prior), now(), &policy());
        assert_eq!(first, second);
    }

    fn message_strategy() -> impl Strategy<Value = Message> {
        (
            -48i64..24 * 30,
            prop::option::of(prop::sample::select(vec![
                "channel_join",
                "bot_message",
                "thread_broadcast",
            ])),
            prop::option::of(prop::sample::select(vec!["alice", "Slackr-Archiver"])),
        )
            .prop_map(|(hours_ago, subtype, author)| Message {
                timestamp: now() - Duration::hours(hours_ago),
                text: "m".to_string(),
                subtype: subtype.map(str::to_string),
                author: author.map(str::to_string),
            })
    }

    proptest! {
        #[test]
        fn reconcile_is_idempotent_and_monotone(
            messages in prop::collection::vec(message_strategy(), 0..8),
            prior_days in prop::option::of(0i64..400),
        ) {
            let prior = prior_days.map(|d| record("C1", "general", days_ago(now(), d)));
            let snap = snapshot("C1", "general", messages);

            let first = reconcile(&snap, prior.as_ref(), now(), &policy());
            let second = reconcile(&snap, prior.as_ref(), now(), &policy());
            prop_assert_eq!(&first, &second);

            if let Some(p) = &prior {
                prop_assert!(first.record.last_active_at >= p.last_active_at);
            }

            let again = reconcile(&snap, Some(&first.record), now(), &policy());
            prop_assert_eq!(again.record.last_active_at, first.record.last_active_at);
        }
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(ReconOutcome::ActiveNow.to_string(), "ACTIVE");
        assert_eq!(ReconOutcome::IdleCarriedForward.to_string(), "IDLE");
        assert_eq!(ReconOutcome::New.to_string(), "NEW");
    }
}
