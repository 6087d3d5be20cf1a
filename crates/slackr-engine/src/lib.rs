// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel lifecycle engine for Slackr.
//!
//! Two phases share this library and communicate only through a
//! [`LedgerStore`](slackr_core::LedgerStore):
//!
//! - [`recon::ReconRunner`] samples each channel's recent messages and
//!   reconciles them into the ledger ([`reconcile`]).
//! - [`archiver::ArchiveRunner`] classifies the ledger into buckets
//!   ([`classify`]) and performs the side effects allowed by the run mode
//!   ([`executor`]).
//!
//! Every remote call made by either phase passes through a [`pacer::CallGate`].

pub mod archiver;
pub mod classify;
pub mod executor;
pub mod pacer;
pub mod recon;
pub mod reconcile;

pub use archiver::{ArchiveReport, ArchiveRunner, RunPhase};
pub use classify::{Classification, Thresholds, classify, days_inactive};
pub use executor::{ActionExecutor, ActionSummary};
pub use pacer::{CallGate, MinIntervalGate, PacedGateway};
pub use recon::{ReconReport, ReconRunner};
pub use reconcile::{ReconOutcome, ReconPolicy, Reconciled, reconcile};
