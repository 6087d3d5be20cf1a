// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only archive audit log.
//!
//! ```text
//! Channels Archived by Slackr Archiver:
//! old-project was archived at 2026-03-01T09:00:00Z
//! ```
//!
//! Entries are only ever appended; nothing in Slackr rewrites or prunes the file.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use slackr_config::model::StorageConfig;
use slackr_core::{AuditSink, SlackrError};
use tracing::{debug, info};

/// First line of a freshly created audit log.
pub const AUDIT_HEADER: &str = "Channels Archived by Slackr Archiver:";

#[derive(Debug, Clone)]
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    /// Open the audit log, creating it with [`AUDIT_HEADER`] if absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SlackrError> {
        let path = path.into();
        if path.exists() {
            debug!(path = %path.display(), "archive audit log found");
        } else {
            std::fs::write(&path, format!("{AUDIT_HEADER}\n"))?;
            info!(path = %path.display(), "archive audit log not found, created");
        }
        Ok(Self { path })
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, SlackrError> {
        Self::open(&config.audit_log_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditLog {
    fn append_archive_entry(
        &mut self,
        channel_name: &str,
        archived_at: DateTime<Utc>,
    ) -> Result<(), SlackrError> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{channel_name} was archived at {}",
            archived_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        file.sync_data()?;
        Ok(())
    }
}
