// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Slackr channel archiver.

use thiserror::Error;

/// The primary error type used across all Slackr collaborator traits and runners.
///
/// Every variant is fatal to the run that produced it: there is no partial
/// retry and no rollback of actions already performed.
#[derive(Debug, Error)]
pub enum SlackrError {
    /// Configuration errors (missing credential, missing ledger for the archiver, bad thresholds).
    #[error("configuration error: {0}")]
    Config(String),

    /// Remote gateway errors (transport failure, non-`ok` API response, malformed payload).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed persisted data (unparseable timestamp, duplicate channel id).
    #[error("data error: {message}")]
    Data { message: String },

    /// File I/O errors on the ledger, whitelist, or audit log.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SlackrError {
    /// Build a [`SlackrError::Gateway`] without an underlying cause.
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway {
            message: message.into(),
            source: None,
        }
    }

    /// Build a [`SlackrError::Data`].
    pub fn data(message: impl Into<String>) -> Self {
        Self::Data {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for SlackrError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage {
            source: Box::new(e),
        }
    }
}
