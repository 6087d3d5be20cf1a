// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File persistence for the Slackr channel archiver.
//!
//! - [`CsvLedgerStore`]: the per-channel last-active ledger, rewritten in full
//!   on every recon run with the previous copy kept as `<path>.last`.
//! - [`FileWhitelistStore`]: operator-maintained names exempt from archival.
//! - [`FileAuditLog`]: append-only history of archived channels.
//!
//! None of these lock their files; overlapping runs must be prevented by the
//! operator.

pub mod audit;
pub mod ledger;
pub mod whitelist;

pub use audit::FileAuditLog;
pub use ledger::CsvLedgerStore;
pub use whitelist::FileWhitelistStore;

use slackr_core::SlackrError;

/// Wrap any error as [`SlackrError::Storage`].
pub(crate) fn storage_err(e: impl std::error::Error + Send + Sync + 'static) -> SlackrError {
    SlackrError::Storage {
        source: Box::new(e),
    }
}
