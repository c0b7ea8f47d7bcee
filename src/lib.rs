//! Valmis - OpenShift/Kubernetes test deployment assistant
//!
//! Valmis deploys an application to a cluster, polls it until it
//! becomes serving-ready, allows controlled scaling, and tears it
//! down - all as bounded async workflows sharing one retry policy.
//! One assistant instance manages exactly one deployed application
//! per test session.
//!
//! # Example
//!
//! ```ignore
//! use valmis::TestAssistant;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut assistant = TestAssistant::new(project_config, deployer);
//!
//!     // Deploy and wait for the route to answer HTTP 200
//!     assistant.deploy().await?;
//!     assert!(assistant.is_ready());
//!     println!("serving at {}", assistant.route());
//!
//!     // Scale out, wait for replica convergence and readiness
//!     assistant.scale(3).await?;
//!
//!     // Arbitrary polled assertions share the same retry budget
//!     assistant.wait_for(|| async { check_something().await }).await?;
//!
//!     // Cleanup
//!     assistant.undeploy().await?;
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod client;
pub mod error;
pub mod poll;
pub mod probe;
pub mod resources;
pub mod scale;
pub mod telemetry;

// Re-export commonly used types
pub use assistant::{Deployer, TestAssistant};
pub use client::{KubeDeploymentConfigs, RestClientProvider};
pub use error::AssistantError;
pub use poll::Poller;
pub use probe::{HttpProbe, Probe};
pub use resources::{DeployOutput, DeploymentConfig, DeploymentConfigList};
pub use scale::DeploymentConfigs;
