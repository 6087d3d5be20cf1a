// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call pacing for the rate-limited remote gateway.
//!
//! Every gateway call made by a runner goes through a [`CallGate`]. The
//! default gate enforces a minimum interval between successive calls; other
//! limiters can be dropped in without touching the runners.

use std::time::Duration;

use async_trait::async_trait;
use slackr_core::{ChannelGateway, ChannelRef, Message, SlackrError};
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tracing::trace;

/// Admission control in front of remote calls.
#[async_trait]
pub trait CallGate: Send + Sync {
    /// Waits until the next call may proceed.
    async fn acquire(&self);
}

/// Allows one call per `interval`, measured between acquisitions.
#[derive(Debug)]
pub struct MinIntervalGate {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl MinIntervalGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[async_trait]
impl CallGate for MinIntervalGate {
    async fn acquire(&self) {
        let mut last = self.last.lock().await;
        if let Some(prev) = *last {
            let ready = prev + self.interval;
            if ready > Instant::now() {
                trace!(wait_ms = (ready - Instant::now()).as_millis() as u64, "pacing gateway call");
                sleep_until(ready).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// A [`ChannelGateway`] that acquires `gate` before every call to `inner`.
pub struct PacedGateway<G, C> {
    inner: G,
    gate: C,
}

impl<G, C> PacedGateway<G, C> {
    pub fn new(inner: G, gate: C) -> Self {
        Self { inner, gate }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: ChannelGateway, C: CallGate> ChannelGateway for PacedGateway<G, C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn list_non_archived_channels(&self) -> Result<Vec<ChannelRef>, SlackrError> {
        self.gate.acquire().await;
        self.inner.list_non_archived_channels().await
    }

    async fn fetch_recent_messages(
        &self,
        channel_id: &str,
        count: usize,
    ) -> Result<Vec<Message>, SlackrError> {
        self.gate.acquire().await;
        self.inner.fetch_recent_messages(channel_id, count).await
    }

    async fn archive_channel(&self, channel_id: &str) -> Result<(), SlackrError> {
        self.gate.acquire().await;
        self.inner.archive_channel(channel_id).await
    }

    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), SlackrError> {
        self.gate.acquire().await;
        self.inner.post_message(channel_id, text).await
    }
}
