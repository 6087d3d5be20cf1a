// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory implementations of the storage traits.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use slackr_core::{
    ArchiveAuditEntry, AuditSink, Ledger, LedgerStore, SlackrError, Whitelist, WhitelistStore,
};

fn poisoned() -> SlackrError {
    SlackrError::Internal("memory store lock poisoned".into())
}

/// Ledger store backed by a shared `Option<Ledger>`.
#[derive(Clone, Default)]
pub struct MemoryLedgerStore {
    inner: Arc<Mutex<Option<Ledger>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryLedgerStore {
    /// An empty store: `load_ledger` returns `None`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        let store = Self::default();
        if let Ok(mut inner) = store.inner.lock() {
            *inner = Some(ledger);
        }
        store
    }

    /// The last saved (or seeded) ledger.
    pub fn snapshot(&self) -> Option<Ledger> {
        self.inner.lock().ok().and_then(|l| l.clone())
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load_ledger(&self) -> Result<Option<Ledger>, SlackrError> {
        Ok(self.inner.lock().map_err(|_| poisoned())?.clone())
    }

    fn save_ledger(&self, ledger: &Ledger) -> Result<(), SlackrError> {
        *self.inner.lock().map_err(|_| poisoned())? = Some(ledger.clone());
        *self.saves.lock().map_err(|_| poisoned())? += 1;
        Ok(())
    }
}

/// Whitelist store returning a fixed set of names.
#[derive(Clone, Default)]
pub struct MemoryWhitelistStore {
    whitelist: Whitelist,
}

impl MemoryWhitelistStore {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            whitelist: names.into_iter().collect(),
        }
    }
}

impl WhitelistStore for MemoryWhitelistStore {
    fn load_whitelist(&self) -> Result<Whitelist, SlackrError> {
        Ok(self.whitelist.clone())
    }
}

/// Audit sink collecting entries in a vector.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    pub entries: Vec<ArchiveAuditEntry>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.channel_name.as_str()).collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn append_archive_entry(
        &mut self,
        channel_name: &str,
        archived_at: DateTime<Utc>,
    ) -> Result<(), SlackrError> {
        self.entries.push(ArchiveAuditEntry {
            channel_name: channel_name.to_string(),
            archived_at,
        });
        Ok(())
    }
}
