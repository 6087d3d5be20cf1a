// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable store traits: channel ledger, whitelist, archive audit log.

use chrono::{DateTime, Utc};

use crate::error::SlackrError;
use crate::types::{Ledger, Whitelist};

/// Owner of ledger durability.
pub trait LedgerStore {
    /// Loads the ledger. `Ok(None)` means no ledger has been written yet.
    fn load_ledger(&self) -> Result<Option<Ledger>, SlackrError>;

    /// Replaces the stored ledger with `ledger` (full overwrite).
    fn save_ledger(&self, ledger: &Ledger) -> Result<(), SlackrError>;
}

/// Source of the operator-maintained whitelist.
pub trait WhitelistStore {
    /// Loads the whitelist, creating an empty one if none exists.
    fn load_whitelist(&self) -> Result<Whitelist, SlackrError>;
}

/// Append-only log of archive actions.
pub trait AuditSink {
    fn append_archive_entry(
        &mut self,
        channel_name: &str,
        archived_at: DateTime<Utc>,
    ) -> Result<(), SlackrError>;
}
