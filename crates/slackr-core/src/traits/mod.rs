// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! The engine talks to the remote workspace and to durable files only through
//! these traits, so each can be replaced by a mock in tests.

pub mod gateway;
pub mod store;

pub use gateway::ChannelGateway;
pub use store::{AuditSink, LedgerStore, WhitelistStore};
