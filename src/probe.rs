//! HTTP readiness probing
//!
//! Readiness is detected by status code: the application is considered
//! ready when a GET against its route returns 200. Any other status is
//! "not yet ready" and retried; a transport-level failure (DNS,
//! connection refused, reset) aborts the whole wait immediately.

use crate::error::AssistantError;
use crate::poll::Poller;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Message carried by a readiness wait timeout
pub const DEPLOY_TIMEOUT: &str = "Timeout for app deploy";

/// An HTTP status probe against a deployed application's route
#[async_trait]
pub trait Probe: Send + Sync {
    /// Issue a GET against the route's root path and return the
    /// response status code. A failure to reach the target at all must
    /// surface as [`AssistantError::Connection`].
    async fn status(&self, route: &str) -> Result<u16, AssistantError>;
}

/// Probe backed by a reqwest client
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> Self {
        // A hung probe must not outlive the poll interval by much
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn status(&self, route: &str) -> Result<u16, AssistantError> {
        let response = self.client.get(route).send().await.map_err(|e| {
            AssistantError::Connection {
                url: route.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(response.status().as_u16())
    }
}

/// Wait for the application behind `route` to answer with HTTP 200
///
/// Polls with the given budget; a non-200 response is retried, a
/// connection failure aborts immediately. Does not touch the
/// assistant's ready flag, the caller owns that transition.
pub async fn wait_for_ready(
    probe: &dyn Probe,
    route: &str,
    retry_limit: u32,
    retry_interval: Duration,
) -> Result<(), AssistantError> {
    debug!(
        route = %route,
        retry_limit = retry_limit,
        retry_interval = ?retry_interval,
        "Waiting for application to become ready"
    );

    Poller::new(retry_interval, retry_limit)
        .timeout_message(DEPLOY_TIMEOUT)
        .run(move || async move {
            let status = probe.status(route).await?;
            debug!(route = %route, status = status, "Probe response");
            Ok(status == 200)
        })
        .await?;

    info!(route = %route, "Application is ready");
    Ok(())
}
