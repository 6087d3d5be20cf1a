// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whitelist file: channel names exempt from archival.
//!
//! The first line is a header (`channel_name`) and is skipped. Every other
//! non-blank field is a channel name, matched exactly after trimming.

use std::path::{Path, PathBuf};

use slackr_config::model::StorageConfig;
use slackr_core::{SlackrError, Whitelist, WhitelistStore};
use tracing::info;

use crate::storage_err;

/// Header written when the whitelist file has to be created.
pub const WHITELIST_HEADER: &str = "channel_name";

#[derive(Debug, Clone)]
pub struct FileWhitelistStore {
    path: PathBuf,
}

impl FileWhitelistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.whitelist_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WhitelistStore for FileWhitelistStore {
    fn load_whitelist(&self) -> Result<Whitelist, SlackrError> {
        if !self.path.exists() {
            std::fs::write(&self.path, format!("{WHITELIST_HEADER}\n"))?;
            info!(path = %self.path.display(), "whitelist not found, created empty file");
            return Ok(Whitelist::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(storage_err)?;

        let mut names = Vec::new();
        for row in reader.records() {
            let row = row.map_err(storage_err)?;
            names.extend(
                row.iter()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string),
            );
        }

        let whitelist: Whitelist = names.into_iter().collect();
        info!(path = %self.path.display(), entries = whitelist.len(), "whitelist loaded");
        Ok(whitelist)
    }
}
