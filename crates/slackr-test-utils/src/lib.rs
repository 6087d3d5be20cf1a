// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Slackr.
//!
//! Provides a scripted [`MockGateway`], in-memory stores, and small fixture
//! builders so engine tests run without network or filesystem access.

pub mod fixtures;
pub mod memory_store;
pub mod mock_gateway;

pub use fixtures::{days_ago, message, record, snapshot};
pub use memory_store::{MemoryAuditSink, MemoryLedgerStore, MemoryWhitelistStore};
pub use mock_gateway::{GatewayCall, MockGateway};
