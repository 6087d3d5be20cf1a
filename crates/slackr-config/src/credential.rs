// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slack API token acquisition from the process environment.

use secrecy::SecretString;
use slackr_core::SlackrError;

/// The environment variable holding the Slack Web API token.
pub const API_TOKEN_ENV_VAR: &str = "SLACK_API_TOKEN";

/// Read the Slack API token from [`API_TOKEN_ENV_VAR`].
///
/// A missing or blank value is a fatal configuration error, raised before
/// any remote call is made.
pub fn api_token_from_env() -> Result<SecretString, SlackrError> {
    match std::env::var(API_TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(SecretString::from(token.trim().to_string())),
        _ => Err(SlackrError::Config(format!(
            "missing {API_TOKEN_ENV_VAR}; export a Slack API token before running"
        ))),
    }
}
