//! Error taxonomy for assistant operations
//!
//! Every fallible operation in this crate settles with exactly one
//! `AssistantError`. Intermediate retry attempts are never reported
//! individually; callers distinguish a poll budget running out
//! (`Timeout`) from a lower-level failure that aborted the wait
//! (`Connection`, `Upstream`).

/// Errors from assistant operations
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Poll budget exhausted without the condition becoming true.
    ///
    /// The message identifies the waited-for condition:
    /// "Timeout for app deploy" for readiness waits, "Retry timeout"
    /// for generic condition waits.
    #[error("{0}")]
    Timeout(&'static str),

    /// The readiness probe could not reach its target at all
    /// (DNS failure, connection refused, reset). Never retried.
    #[error("Failed to reach {url}: {reason}")]
    Connection { url: String, reason: String },

    /// Deploy output was missing an expected resource kind.
    #[error("Deploy output missing resource of kind {0:?}")]
    Parse(&'static str),

    /// An external deploy/undeploy/cluster-API call failed.
    #[error("Cluster operation failed: {0}")]
    Upstream(String),

    /// Cluster client bootstrap failed (config discovery or construction).
    #[error("Failed to create cluster client: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display_is_exact_message() {
        assert_eq!(
            AssistantError::Timeout("Timeout for app deploy").to_string(),
            "Timeout for app deploy"
        );
        assert_eq!(
            AssistantError::Timeout("Retry timeout").to_string(),
            "Retry timeout"
        );
    }

    #[test]
    fn test_connection_display_includes_target() {
        let err = AssistantError::Connection {
            url: "http://example.com".to_string(),
            reason: "connection refused".to_string(),
        };
        let output = err.to_string();
        assert!(output.contains("http://example.com"));
        assert!(output.contains("connection refused"));
    }

    #[test]
    fn test_parse_display_names_kind() {
        let err = AssistantError::Parse("Route");
        assert!(err.to_string().contains("\"Route\""));
    }
}
