//! Deployment lifecycle orchestration
//!
//! [`TestAssistant`] is the crate's entry point. One instance manages
//! exactly one deployed application per test session: deploy it, wait
//! until it answers HTTP 200 on its route, scale it with convergence
//! waiting, run arbitrary polled assertions, and undeploy it. The
//! instance may be redeployed after undeploy.
//!
//! Construct instances explicitly; each test run gets its own isolated
//! assistant. Overlapping `deploy`/`scale`/`undeploy` calls on one
//! instance are not a supported usage.
//!
//! # Example
//!
//! ```ignore
//! use valmis::TestAssistant;
//!
//! let mut assistant = TestAssistant::new(project_config, deployer);
//! assistant.deploy().await?;
//! assert!(assistant.is_ready());
//!
//! let response = http_get(assistant.route()).await?;
//!
//! assistant.scale(3).await?;
//! assistant.undeploy().await?;
//! ```

use crate::client::{KubeDeploymentConfigs, RestClientProvider};
use crate::error::AssistantError;
use crate::poll::Poller;
use crate::probe::{self, HttpProbe, Probe};
use crate::scale::{self, DeploymentConfigs};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// The external engine that applies and removes the application's
/// cluster resources from a project descriptor
///
/// Implementations are outside this crate; the assistant only consumes
/// the interface. Failures surface as [`AssistantError::Upstream`].
#[async_trait]
pub trait Deployer: Send + Sync {
    /// Apply the application's resources and report what was applied
    async fn deploy(
        &self,
        config: &serde_json::Value,
    ) -> Result<crate::resources::DeployOutput, AssistantError>;

    /// Remove the application's resources
    async fn undeploy(&self, config: &serde_json::Value) -> Result<(), AssistantError>;
}

const DEFAULT_RETRY_LIMIT: u32 = 20;
const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(5000);

/// Stateful assistant for one deployed application
pub struct TestAssistant {
    deployer: Arc<dyn Deployer>,
    probe: Arc<dyn Probe>,
    configs: Arc<dyn DeploymentConfigs>,
    config: serde_json::Value,
    retry_limit: u32,
    retry_interval: Duration,
    ready: bool,
    route: String,
    namespace: String,
    application_name: String,
}

impl TestAssistant {
    /// Create an assistant for the given project descriptor
    ///
    /// Wires the default HTTP probe and a cluster-backed descriptor
    /// API behind a lazily constructed client.
    pub fn new(config: serde_json::Value, deployer: Arc<dyn Deployer>) -> Self {
        Self {
            deployer,
            probe: Arc::new(HttpProbe::new()),
            configs: Arc::new(KubeDeploymentConfigs::new(RestClientProvider::new())),
            config,
            retry_limit: DEFAULT_RETRY_LIMIT,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            ready: false,
            route: String::new(),
            namespace: String::new(),
            application_name: String::new(),
        }
    }

    /// Replace the readiness probe
    pub fn with_probe(mut self, probe: Arc<dyn Probe>) -> Self {
        self.probe = probe;
        self
    }

    /// Replace the descriptor API used by scale operations
    pub fn with_deployment_configs(mut self, configs: Arc<dyn DeploymentConfigs>) -> Self {
        self.configs = configs;
        self
    }

    /// Deploy the application and wait until it's ready
    ///
    /// The ready flag is forced false up front, so a failed redeploy
    /// can never leave a stale true behind. On success the route,
    /// namespace, and application name are (re)assigned from the
    /// deploy output and the flag flips true only after the route
    /// answers HTTP 200.
    pub async fn deploy(&mut self) -> Result<(), AssistantError> {
        self.ready = false;

        info!("Deploying application");
        let output = self.deployer.deploy(&self.config).await?;

        let host = output.route_host().ok_or(AssistantError::Parse("Route"))?;
        let (name, namespace) = output
            .deployment_config()
            .ok_or(AssistantError::Parse("DeploymentConfig"))?;

        self.route = format!("http://{host}");
        self.application_name = name.to_string();
        self.namespace = namespace.to_string();

        debug!(
            route = %self.route,
            name = %self.application_name,
            namespace = %self.namespace,
            "Parsed deploy output"
        );

        probe::wait_for_ready(
            self.probe.as_ref(),
            &self.route,
            self.retry_limit,
            self.retry_interval,
        )
        .await?;

        self.ready = true;
        info!(route = %self.route, "Application deployed and ready");
        Ok(())
    }

    /// Undeploy the application and release its cluster resources
    pub async fn undeploy(&mut self) -> Result<(), AssistantError> {
        self.ready = false;
        info!("Undeploying application");
        self.deployer.undeploy(&self.config).await
    }

    /// Scale the deployed application to the desired replica count and
    /// wait for the cluster to converge
    ///
    /// After a scale-up the route is probed again with the full retry
    /// budget; scaling to zero skips the probe, there are no pods left
    /// to answer it.
    pub async fn scale(&self, replicas: i32) -> Result<(), AssistantError> {
        scale::scale_to(
            self.configs.as_ref(),
            &self.application_name,
            &self.namespace,
            replicas,
            self.poller(),
        )
        .await?;

        if replicas > 0 {
            probe::wait_for_ready(
                self.probe.as_ref(),
                &self.route,
                self.retry_limit,
                self.retry_interval,
            )
            .await?;
        }

        Ok(())
    }

    /// Run a caller-supplied condition through the assistant's poll
    /// budget
    ///
    /// Use for arbitrary cluster-state assertions beyond readiness and
    /// replica counts.
    ///
    /// # Example
    ///
    /// ```ignore
    /// assistant
    ///     .wait_for(|| async { fetch_metric().await > 0 })
    ///     .await?;
    /// ```
    pub async fn wait_for<F, Fut>(&self, mut condition: F) -> Result<(), AssistantError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        self.poller()
            .run(move || {
                let fut = condition();
                async move { Ok(fut.await) }
            })
            .await
    }

    fn poller(&self) -> Poller {
        Poller::new(self.retry_interval, self.retry_limit)
    }

    /// Externally reachable base URL of the deployed application;
    /// empty until the first successful deploy
    pub fn route(&self) -> &str {
        &self.route
    }

    /// True only between a successful deploy's readiness confirmation
    /// and the next undeploy or redeploy attempt
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Namespace of the deployed workload; empty iff no deploy has
    /// succeeded yet
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Name of the deployed workload; empty iff no deploy has
    /// succeeded yet
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Max poll attempts for subsequent operations
    pub fn retry_limit(&self) -> u32 {
        self.retry_limit
    }

    pub fn set_retry_limit(&mut self, limit: u32) {
        self.retry_limit = limit;
    }

    /// Delay between poll attempts for subsequent operations
    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    pub fn set_retry_interval(&mut self, interval: Duration) {
        self.retry_interval = interval;
    }
}
