//! Bounded condition polling
//!
//! Converts an arbitrary async condition into a resolve-or-timeout
//! operation: evaluate, sleep a fixed interval, re-evaluate, up to a
//! fixed attempt budget. All waits in this crate (readiness probes,
//! replica convergence, caller-supplied predicates) go through one
//! [`Poller`] so the retry/timeout logic is not duplicated per
//! concrete condition.
//!
//! # Example
//!
//! ```ignore
//! use valmis::poll::Poller;
//! use std::time::Duration;
//!
//! Poller::new(Duration::from_secs(5), 20)
//!     .timeout_message("Timeout for app deploy")
//!     .run(|| async { Ok(check_something().await) })
//!     .await?;
//! ```

use crate::error::AssistantError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Default message carried by a generic poll timeout
pub const RETRY_TIMEOUT: &str = "Retry timeout";

/// A fixed-interval, fixed-budget retry loop
///
/// With a budget of N attempts the loop performs the initial check plus
/// up to N−1 delayed re-checks: N evaluations, N−1 sleeps. An attempt
/// budget of 0 fails immediately without evaluating the condition.
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    interval: Duration,
    attempts: u32,
    timeout_message: &'static str,
}

impl Poller {
    /// Create a poller with the given interval between attempts and
    /// total attempt budget
    pub fn new(interval: Duration, attempts: u32) -> Self {
        Self {
            interval,
            attempts,
            timeout_message: RETRY_TIMEOUT,
        }
    }

    /// Set the message carried by the Timeout error when the budget
    /// runs out
    pub fn timeout_message(mut self, message: &'static str) -> Self {
        self.timeout_message = message;
        self
    }

    /// Run the condition until it yields true or the budget runs out
    ///
    /// The first evaluation happens immediately and counts against the
    /// budget. A true result resolves with no further delay. An error
    /// from the condition propagates immediately without consuming
    /// further retries.
    pub async fn run<F, Fut>(&self, mut condition: F) -> Result<(), AssistantError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, AssistantError>>,
    {
        for attempt in 1..=self.attempts {
            if condition().await? {
                debug!(attempt = attempt, "Condition met");
                return Ok(());
            }

            if attempt < self.attempts {
                debug!(
                    attempt = attempt,
                    attempts = self.attempts,
                    interval = ?self.interval,
                    "Condition not met, waiting"
                );
                sleep(self.interval).await;
            }
        }

        warn!(
            attempts = self.attempts,
            message = self.timeout_message,
            "Poll budget exhausted"
        );
        Err(AssistantError::Timeout(self.timeout_message))
    }
}
