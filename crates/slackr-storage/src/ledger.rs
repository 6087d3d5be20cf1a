// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV implementation of the [`LedgerStore`] trait.
//!
//! File layout, one row per channel:
//!
//! ```text
//! channel_name,channel_id,channel_last_active_date,channel_listed
//! general,C024BE91L,2026-03-01T12:00:00Z,true
//! ```
//!
//! Files written before the `channel_listed` column existed are still
//! readable; their rows load as listed. Timestamps are written RFC 3339 and
//! the legacy `YYYY-MM-DD HH:MM:SS +HHMM` form is accepted on read.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use slackr_config::model::StorageConfig;
use slackr_core::{ChannelRecord, Ledger, LedgerStore, SlackrError};
use tracing::{debug, info, warn};

use crate::storage_err;

const HEADERS: [&str; 4] = [
    "channel_name",
    "channel_id",
    "channel_last_active_date",
    "channel_listed",
];

const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Deserialize)]
struct LedgerRow {
    channel_name: String,
    channel_id: String,
    channel_last_active_date: String,
    #[serde(default = "listed_by_default")]
    channel_listed: bool,
}

fn listed_by_default() -> bool {
    true
}

/// Ledger persisted as a CSV file, with the previous version kept alongside.
#[derive(Debug, Clone)]
pub struct CsvLedgerStore {
    path: PathBuf,
    backup_path: PathBuf,
}

impl CsvLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut backup: OsString = path.as_os_str().to_owned();
        backup.push(".last");
        Self {
            path,
            backup_path: PathBuf::from(backup),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.ledger_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the copy written by the previous save.
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    fn read_file(path: &Path) -> Result<Ledger, SlackrError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| csv_err(path, e))?;

        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<LedgerRow>().enumerate() {
            // Line 1 is the header.
            let line = i + 2;
            let row = row.map_err(|e| csv_err(path, e))?;
            let last_active_at = parse_timestamp(&row.channel_last_active_date).ok_or_else(|| {
                SlackrError::data(format!(
                    "{}:{line}: unparseable last-active date `{}` for channel `{}`",
                    path.display(),
                    row.channel_last_active_date,
                    row.channel_name
                ))
            })?;
            if row.channel_id.is_empty() {
                return Err(SlackrError::data(format!(
                    "{}:{line}: empty channel id",
                    path.display()
                )));
            }
            records.push(ChannelRecord {
                channel_id: row.channel_id,
                channel_name: row.channel_name,
                last_active_at,
                listed: row.channel_listed,
            });
        }

        Ledger::from_records(records)
    }

    fn write_file(&self, ledger: &Ledger) -> Result<(), SlackrError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file_mut());
            writer.write_record(HEADERS).map_err(storage_err)?;
            for record in ledger.records() {
                let last_active = record
                    .last_active_at
                    .to_rfc3339_opts(SecondsFormat::AutoSi, true);
                let listed = record.listed.to_string();
                writer
                    .write_record([
                        record.channel_name.as_str(),
                        record.channel_id.as_str(),
                        last_active.as_str(),
                        listed.as_str(),
                    ])
                    .map_err(storage_err)?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        if self.path.exists() {
            std::fs::rename(&self.path, &self.backup_path)?;
            debug!(backup = %self.backup_path.display(), "previous ledger rotated");
        }
        tmp.persist(&self.path).map_err(|e| storage_err(e.error))?;
        Ok(())
    }
}

impl LedgerStore for CsvLedgerStore {
    fn load_ledger(&self) -> Result<Option<Ledger>, SlackrError> {
        if self.path.exists() {
            let ledger = Self::read_file(&self.path)?;
            info!(path = %self.path.display(), records = ledger.len(), "ledger loaded");
            return Ok(Some(ledger));
        }

        if self.backup_path.exists() {
            warn!(
                path = %self.path.display(),
                backup = %self.backup_path.display(),
                "ledger not found, loading previous copy instead"
            );
            let ledger = Self::read_file(&self.backup_path)?;
            return Ok(Some(ledger));
        }

        info!(path = %self.path.display(), "no ledger found");
        Ok(None)
    }

    fn save_ledger(&self, ledger: &Ledger) -> Result<(), SlackrError> {
        self.write_file(ledger)?;
        info!(path = %self.path.display(), records = ledger.len(), "ledger saved");
        Ok(())
    }
}

/// Parse an RFC 3339 or legacy `YYYY-MM-DD HH:MM:SS +HHMM` timestamp.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, LEGACY_TIMESTAMP_FORMAT))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn csv_err(path: &Path, e: csv::Error) -> SlackrError {
    if e.is_io_error() {
        return storage_err(e);
    }
    let line = e
        .position()
        .map(|p| format!(":{}", p.line()))
        .unwrap_or_default();
    SlackrError::data(format!("{}{line}: malformed ledger row: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, name: &str, listed: bool) -> ChannelRecord {
        ChannelRecord {
            channel_id: id.into(),
            channel_name: name.into(),
            last_active_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap(),
            listed,
        }
    }

    #[test]
    fn missing_ledger_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLedgerStore::new(dir.path().join("channels.db"));
        assert!(store.load_ledger().unwrap().is_none());
    }

    #[test]
    fn save_then_load_preserves_order_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLedgerStore::new(dir.path().join("channels.db"));
        let ledger = Ledger::from_records(vec![
            record("C2", "zeta", true),
            record("C1", "alpha", false),
        ])
        .unwrap();

        store.save_ledger(&ledger).unwrap();
        let loaded = store.load_ledger().unwrap().unwrap();
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn written_file_has_expected_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channels.db");
        let store = CsvLedgerStore::new(&path);
        store
            .save_ledger(&Ledger::from_records(vec![record("C1", "general", true)]).unwrap())
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "channel_name,channel_id,channel_last_active_date,channel_listed\n\
             general,C1,2026-03-01T12:30:00Z,true\n"
        );
    }

    #[test]
    fn empty_ledger_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channels.db");
        let store = CsvLedgerStore::new(&path);
        store.save_ledger(&Ledger::new()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(store.load_ledger().unwrap().unwrap().is_empty());
    }

    #[test]
    fn save_rotates_previous_copy() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLedgerStore::new(dir.path().join("channels.db"));
        let first = Ledger::from_records(vec![record("C1", "first", true)]).unwrap();
        let second = Ledger::from_records(vec![record("C1", "second", true)]).unwrap();

        store.save_ledger(&first).unwrap();
        store.save_ledger(&second).unwrap();

        let previous = CsvLedgerStore::read_file(store.backup_path()).unwrap();
        assert_eq!(previous.records()[0].channel_name, "first");
        let current = store.load_ledger().unwrap().unwrap();
        assert_eq!(current.records()[0].channel_name, "second");
    }

    #[test]
    fn falls_back_to_previous_copy_when_primary_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLedgerStore::new(dir.path().join("channels.db"));
        store
            .save_ledger(&Ledger::from_records(vec![record("C1", "kept", true)]).unwrap())
            .unwrap();
        std::fs::rename(store.path(), store.backup_path()).unwrap();

        let loaded = store.load_ledger().unwrap().unwrap();
        assert_eq!(loaded.records()[0].channel_name, "kept");
    }

    #[test]
    fn reads_legacy_three_column_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channels.db");
        std::fs::write(
            &path,
            "channel_name,channel_id,channel_last_active_date\n\
             general,C1,2017-08-22 14:05:56 -0500\n",
        )
        .unwrap();

        let ledger = CsvLedgerStore::new(&path).load_ledger().unwrap().unwrap();
        let rec = &ledger.records()[0];
        assert_eq!(rec.channel_name, "general");
        assert!(rec.listed);
        assert_eq!(
            rec.last_active_at,
            Utc.with_ymd_and_hms(2017, 8, 22, 19, 5, 56).unwrap()
        );
    }

    #[test]
    fn unparseable_timestamp_is_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channels.db");
        std::fs::write(
            &path,
            "channel_name,channel_id,channel_last_active_date,channel_listed\n\
             general,C1,last tuesday,true\n",
        )
        .unwrap();

        let err = CsvLedgerStore::new(&path).load_ledger().unwrap_err();
        assert!(
            matches!(err, SlackrError::Data { ref message } if message.contains(":2:") && message.contains("last tuesday")),
            "got: {err}"
        );
    }

    #[test]
    fn short_row_is_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channels.db");
        std::fs::write(
            &path,
            "channel_name,channel_id,channel_last_active_date,channel_listed\ngeneral\n",
        )
        .unwrap();

        let err = CsvLedgerStore::new(&path).load_ledger().unwrap_err();
        assert!(matches!(err, SlackrError::Data { .. }), "got: {err}");
    }

    #[test]
    fn duplicate_channel_id_is_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channels.db");
        std::fs::write(
            &path,
            "channel_name,channel_id,channel_last_active_date,channel_listed\n\
             general,C1,2026-03-01T12:00:00Z,true\n\
             general-2,C1,2026-03-02T12:00:00Z,true\n",
        )
        .unwrap();

        let err = CsvLedgerStore::new(&path).load_ledger().unwrap_err();
        assert!(matches!(err, SlackrError::Data { .. }));
    }

    #[test]
    fn parse_timestamp_accepts_both_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(parse_timestamp("2026-01-02T03:04:05Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-01-02T04:04:05+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-01-02 03:04:05 +0000"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
