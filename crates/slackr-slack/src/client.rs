// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Slack Web API.
//!
//! Handles authentication, URL construction, and mapping of transport,
//! HTTP-status, and `ok: false` failures to [`SlackrError::Gateway`].
//! There is no retry: a failed call is fatal to the run.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use slackr_core::SlackrError;
use tracing::debug;

/// Authenticated Slack Web API client.
#[derive(Debug)]
pub struct SlackClient {
    http: reqwest::Client,
    api_base: String,
    token: SecretString,
}

impl SlackClient {
    /// Creates a client for `api_base` (e.g. `https://slack.com/api`).
    pub fn new(
        api_base: &str,
        token: SecretString,
        request_timeout: Duration,
    ) -> Result<Self, SlackrError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("slackr-archiver"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()
            .map_err(|e| SlackrError::Gateway {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Calls a read method with query parameters.
    pub async fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SlackrError> {
        let url = Url::parse_with_params(&format!("{}/{method}", self.api_base), params)
            .map_err(|e| SlackrError::Config(format!("invalid slack.api_base: {e}")))?;
        debug!(method, "slack api GET");
        let request = self
            .http
            .get(url)
            .bearer_auth(self.token.expose_secret());
        self.send(method, request).await
    }

    /// Calls a write method with a JSON body.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, SlackrError> {
        debug!(method, "slack api POST");
        let request = self
            .http
            .post(format!("{}/{method}", self.api_base))
            .bearer_auth(self.token.expose_secret())
            .json(body);
        self.send(method, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SlackrError> {
        let response = request.send().await.map_err(|e| SlackrError::Gateway {
            message: format!("slack {method} request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SlackrError::gateway(status_message(
                method,
                status,
                response.headers(),
            )));
        }

        response.json::<T>().await.map_err(|e| SlackrError::Gateway {
            message: format!("failed to decode slack {method} response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn status_message(method: &str, status: StatusCode, headers: &HeaderMap) -> String {
    let retry_after = headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok());
    match retry_after {
        Some(secs) if status == StatusCode::TOO_MANY_REQUESTS => format!(
            "slack {method} rate limited (HTTP 429, retry after {secs}s)"
        ),
        _ => format!("slack {method} failed with HTTP {}", status.as_u16()),
    }
}

/// Turns an `ok: false` Web API response into a gateway error.
pub fn check_ok(method: &str, ok: bool, error: Option<&str>) -> Result<(), SlackrError> {
    if ok {
        Ok(())
    } else {
        Err(SlackrError::gateway(format!(
            "slack {method} failed: {}",
            error.unwrap_or("unknown error")
        )))
    }
}
