// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Slackr channel archiver.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, `SLACKR_*` environment overrides, miette diagnostics
//! with typo suggestions, and Slack token lookup.
//!
//! # Usage
//!
//! ```no_run
//! use slackr_config::load_and_validate;
//!
//! let config = load_and_validate(None).expect("config errors");
//! println!("ledger: {}", config.storage.ledger_path);
//! ```

pub mod credential;
pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use credential::{API_TOKEN_ENV_VAR, api_token_from_env};
pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::SlackrConfig;

/// Load configuration and validate it.
///
/// With `path`, only that file (plus env overrides) is read; otherwise the
/// XDG hierarchy is used. Figment errors are converted to diagnostics with
/// source spans; semantic errors come from [`validation::validate_config`].
pub fn load_and_validate(path: Option<&Path>) -> Result<SlackrConfig, Vec<ConfigError>> {
    let loaded = match path {
        Some(p) => loader::load_config_from_path(p),
        None => loader::load_config(),
    };
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources(path);
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<SlackrConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources(explicit: Option<&Path>) -> Vec<(String, String)> {
    let candidates: Vec<std::path::PathBuf> = match explicit {
        Some(p) => vec![p.to_path_buf()],
        None => {
            let mut paths = vec![std::path::PathBuf::from(loader::SYSTEM_CONFIG_PATH)];
            if let Some(config_dir) = dirs::config_dir() {
                paths.push(config_dir.join("slackr/slackr.toml"));
            }
            if let Ok(cwd) = std::env::current_dir() {
                paths.push(cwd.join(loader::LOCAL_CONFIG_PATH));
            }
            paths
        }
    };

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
