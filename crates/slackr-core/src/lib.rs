// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Slackr channel archiver.
//!
//! This crate provides the error taxonomy, the channel ledger data model, and
//! the collaborator traits (remote gateway, ledger store, whitelist store,
//! audit sink) that the recon and archiver phases are written against.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SlackrError;
pub use types::{
    ArchiveAuditEntry, Bucket, ChannelRecord, ChannelRef, ChannelSnapshot, Ledger, Message,
    RunMode, Whitelist,
};

pub use traits::{AuditSink, ChannelGateway, LedgerStore, WhitelistStore};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, name: &str) -> ChannelRecord {
        ChannelRecord {
            channel_id: id.into(),
            channel_name: name.into(),
            last_active_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            listed: true,
        }
    }

    #[test]
    fn slackr_error_has_all_variants() {
        let _config = SlackrError::Config("test".into());
        let _gateway = SlackrError::gateway("test");
        let _data = SlackrError::data("test");
        let _storage = SlackrError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _internal = SlackrError::Internal("test".into());
    }

    #[test]
    fn io_error_maps_to_storage() {
        let err: SlackrError = std::io::Error::other("disk full").into();
        assert!(matches!(err, SlackrError::Storage { .. }));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn run_mode_display_and_parse() {
        use std::str::FromStr;

        for mode in [RunMode::Dry, RunMode::Notify, RunMode::Active] {
            let s = mode.to_string();
            assert_eq!(RunMode::from_str(&s).unwrap(), mode);
        }
        assert_eq!(RunMode::Dry.to_string(), "DRY");
    }

    #[test]
    fn run_mode_serialization() {
        let json = serde_json::to_string(&RunMode::Notify).expect("should serialize");
        let parsed: RunMode = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(parsed, RunMode::Notify);
    }

    #[test]
    fn ledger_preserves_insertion_order() {
        let ledger =
            Ledger::from_records(vec![record("C2", "beta"), record("C1", "alpha")]).unwrap();
        let ids: Vec<&str> = ledger
            .records()
            .iter()
            .map(|r| r.channel_id.as_str())
            .collect();
        assert_eq!(ids, vec!["C2", "C1"]);
        assert_eq!(ledger.get("C1").unwrap().channel_name, "alpha");
        assert!(ledger.get("C3").is_none());

        let names: Vec<String> = ledger
            .into_records()
            .into_iter()
            .map(|r| r.channel_name)
            .collect();
        assert_eq!(names, vec!["beta", "alpha"]);
    }

    #[test]
    fn ledger_rejects_duplicate_ids() {
        let err = Ledger::from_records(vec![record("C1", "alpha"), record("C1", "again")])
            .unwrap_err();
        assert!(matches!(err, SlackrError::Data { ref message } if message.contains("C1")));
    }

    #[test]
    fn ledger_upsert_replaces_in_place() {
        let mut ledger =
            Ledger::from_records(vec![record("C1", "alpha"), record("C2", "beta")]).unwrap();
        ledger.upsert(record("C1", "alpha-renamed"));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records()[0].channel_name, "alpha-renamed");
    }

    #[test]
    fn whitelist_is_exact_match() {
        let whitelist: Whitelist = ["core-team", "general"].into_iter().collect();
        assert!(whitelist.contains("core-team"));
        assert!(!whitelist.contains("Core-Team"));
        assert!(!whitelist.contains("core"));
        assert_eq!(whitelist.len(), 2);
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_gateway<T: ChannelGateway>() {}
        fn _assert_ledger_store<T: LedgerStore>() {}
        fn _assert_whitelist_store<T: WhitelistStore>() {}
        fn _assert_audit_sink<T: AuditSink>() {}
    }
}
