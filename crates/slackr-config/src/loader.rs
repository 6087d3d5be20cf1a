// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolves a [`SlackrConfig`] from compiled defaults, TOML files and the
//! process environment.
//!
//! Layers, lowest priority first: defaults, `/etc/slackr/slackr.toml`, the
//! per-user `slackr/slackr.toml` under the platform config dir, then either
//! `./slackr.toml` or an explicit `--config` file, and finally `SLACKR_*`
//! variables. Missing files are skipped.

#![allow(clippy::result_large_err)] // errors are figment's own type

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SlackrConfig;

/// Reads the full default layer stack used when no `--config` is given.
pub fn load_config() -> Result<SlackrConfig, figment::Error> {
    build_figment().extract()
}

/// Defaults overlaid with `toml_content`. Files and env are ignored.
pub fn load_config_from_str(toml_content: &str) -> Result<SlackrConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SlackrConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Defaults, then the file at `path`, then `SLACKR_*`. The system and user
/// files are not consulted when the operator names a file explicitly.
pub fn load_config_from_path(path: &Path) -> Result<SlackrConfig, figment::Error> {
    tracing::debug!(path = %path.display(), "loading configuration file");
    Figment::new()
        .merge(Serialized::defaults(SlackrConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Unextracted layer stack behind [`load_config`].
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SlackrConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("slackr/slackr.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Machine-wide layer.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/slackr/slackr.toml";

/// Layer read from the current directory.
pub const LOCAL_CONFIG_PATH: &str = "slackr.toml";

/// `SLACKR_<SECTION>_<KEY>` variables. Only the first underscore after the
/// section name becomes a dot, so `SLACKR_ARCHIVER_ARCHIVE_AFTER_DAYS` lands
/// on `archiver.archive_after_days`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("SLACKR_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("general_", "general.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("slack_", "slack.", 1)
            .replacen("recon_", "recon.", 1)
            .replacen("archiver_", "archiver.", 1);
        mapped.into()
    })
}
