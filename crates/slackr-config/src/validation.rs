// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as threshold ordering, non-empty paths, and URL schemes.

use crate::diagnostic::ConfigError;
use crate::model::SlackrConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Longest accepted recon window: one hundred years.
pub const MAX_RECENT_WINDOW_HOURS: u32 = 24 * 365 * 100;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SlackrConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.general.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "general.log_level `{}` is not one of {}",
                config.general.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for (key, value) in [
        ("storage.ledger_path", &config.storage.ledger_path),
        ("storage.whitelist_path", &config.storage.whitelist_path),
        ("storage.audit_log_path", &config.storage.audit_log_path),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    let api_base = config.slack.api_base.trim();
    if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
        errors.push(ConfigError::Validation {
            message: format!("slack.api_base `{api_base}` must start with http:// or https://"),
        });
    }

    if config.slack.list_page_size == 0 {
        errors.push(ConfigError::Validation {
            message: "slack.list_page_size must be at least 1".to_string(),
        });
    }

    if config.recon.history_count == 0 {
        errors.push(ConfigError::Validation {
            message: "recon.history_count must be at least 1".to_string(),
        });
    }

    if config.recon.recent_window_hours == 0 {
        errors.push(ConfigError::Validation {
            message: "recon.recent_window_hours must be at least 1".to_string(),
        });
    } else if config.recon.recent_window_hours > MAX_RECENT_WINDOW_HOURS {
        errors.push(ConfigError::Validation {
            message: format!(
                "recon.recent_window_hours ({}) must be at most {MAX_RECENT_WINDOW_HOURS}",
                config.recon.recent_window_hours
            ),
        });
    }

    if config.archiver.archive_after_days == 0 {
        errors.push(ConfigError::Validation {
            message: "archiver.archive_after_days must be at least 1".to_string(),
        });
    }

    if config.archiver.notify_after_days >= config.archiver.archive_after_days {
        errors.push(ConfigError::Validation {
            message: format!(
                "archiver.notify_after_days ({}) must be lower than archiver.archive_after_days ({})",
                config.archiver.notify_after_days, config.archiver.archive_after_days
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = SlackrConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn notify_threshold_must_be_below_archive_threshold() {
        let mut config = SlackrConfig::default();
        config.archiver.notify_after_days = 60;
        config.archiver.archive_after_days = 60;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "notify_after_days"));
    }

    #[test]
    fn empty_ledger_path_fails_validation() {
        let mut config = SlackrConfig::default();
        config.storage.ledger_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "storage.ledger_path"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = SlackrConfig::default();
        config.general.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "general.log_level"));
    }

    #[test]
    fn bad_api_base_fails_validation() {
        let mut config = SlackrConfig::default();
        config.slack.api_base = "slack.com/api".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "slack.api_base"));
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = SlackrConfig::default();
        config.recon.history_count = 0;
        config.recon.recent_window_hours = 0;
        config.archiver.archive_after_days = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "history_count"));
        assert!(has_error(&errors, "recent_window_hours"));
        assert!(has_error(&errors, "archive_after_days"));
    }

    #[test]
    fn huge_recent_window_is_rejected() {
        let mut config = SlackrConfig::default();
        config.recon.recent_window_hours = u32::MAX;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "at most"));

        config.recon.recent_window_hours = MAX_RECENT_WINDOW_HOURS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn archiver_deny_unknown_fields() {
        let toml_str = r#"
[archiver]
archive_after_days = 90
archive_after_weeks = 12
"#;
        let result = toml::from_str::<SlackrConfig>(toml_str);
        assert!(result.is_err());
    }
}
