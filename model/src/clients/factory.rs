use crate::clients::error::{self, Error};
use crate::clients::PodClient;
use crate::RunConfiguration;
use async_trait::async_trait;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Config;
use log::debug;
use snafu::ResultExt;
use std::fmt::{Debug, Display};
use std::sync::Arc;

/// Produces a brand new client every time it is asked. The driver asks once per test so that
/// problems attributable to one test (throttling, broken connections) cannot leak into the next.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// The client handed to each test.
    type Client: Send + 'static;

    /// The error type returned when a client cannot be created.
    type E: Debug + Display + Send + Sync + 'static;

    async fn client(&self) -> Result<Self::Client, Self::E>;
}

/// The default [`ClientFactory`]. Each call reads the kubeconfig again and builds a new
/// `kube::Client` with its own connection pool.
#[derive(Debug, Clone)]
pub struct PodClientFactory {
    config: Arc<RunConfiguration>,
}

impl PodClientFactory {
    pub fn new(config: Arc<RunConfiguration>) -> Self {
        Self { config }
    }

    async fn kube_config(&self) -> Result<Config, Error> {
        let options = KubeConfigOptions {
            context: self.config.context.clone(),
            ..KubeConfigOptions::default()
        };
        let mut kube_config = match (&self.config.kubeconfig, &self.config.context) {
            (Some(path), _) => {
                let kubeconfig = Kubeconfig::read_from(path)
                    .context(error::KubeconfigReadSnafu { path })?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .context(error::KubeconfigSnafu)?
            }
            (None, Some(_)) => Config::from_kubeconfig(&options)
                .await
                .context(error::KubeconfigSnafu)?,
            (None, None) => Config::infer().await.context(error::InferConfigSnafu)?,
        };
        if let Some(host) = &self.config.host {
            kube_config.cluster_url = host
                .parse()
                .context(error::InvalidHostSnafu { host: host.as_str() })?;
        }
        Ok(kube_config)
    }
}

#[async_trait]
impl ClientFactory for PodClientFactory {
    type Client = PodClient;
    type E = Error;

    async fn client(&self) -> Result<Self::Client, Self::E> {
        let kube_config = self.kube_config().await?;
        debug!(
            "creating client for '{}' in namespace '{}'",
            kube_config.cluster_url, self.config.namespace
        );
        let k8s_client =
            kube::Client::try_from(kube_config).context(error::InitializationSnafu)?;
        Ok(PodClient::new_from_k8s_client(
            k8s_client,
            &self.config.namespace,
        ))
    }
}
