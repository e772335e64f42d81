use super::HttpStatusCode;
use crate::clients::error::{self, Error};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{DeleteParams, PostParams};
use kube::Api;
use log::{debug, trace};
use snafu::ResultExt;
use std::fmt::{Debug, Display};

/// The `ClusterClient` is the interface the checks use to talk to the cluster under test. The
/// purpose of the interface is to allow injection of a mock so that checks can be tested without
/// the presence of a k8s cluster. In practice you will use [`PodClient`].
///
/// Implementations are expected to be cheap to clone so that a check can hand a copy to a cleanup
/// action.
#[async_trait]
pub trait ClusterClient: Clone + Send + Sync + 'static {
    /// The error type returned by this trait's functions.
    type E: Debug + Display + Send + Sync + 'static;

    /// Create `pod` and return the object as accepted by the API server.
    async fn create_pod(&self, pod: Pod) -> Result<Pod, Self::E>;

    /// Fetch the current state of the pod named `name`.
    async fn get_pod(&self, name: &str) -> Result<Pod, Self::E>;

    /// Delete the pod named `name`. Deleting a pod that does not exist is not an error.
    async fn delete_pod(&self, name: &str) -> Result<(), Self::E>;
}

/// The default [`ClusterClient`], which works with the pods of a single namespace.
#[derive(Clone)]
pub struct PodClient {
    api: Api<Pod>,
    namespace: String,
}

impl PodClient {
    pub fn new_from_k8s_client(k8s_client: kube::Client, namespace: &str) -> Self {
        Self {
            api: Api::<Pod>::namespaced(k8s_client, namespace),
            namespace: namespace.to_string(),
        }
    }

    pub fn api(&self) -> &Api<Pod> {
        &self.api
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl Debug for PodClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PodClient")
            .field("namespace", &self.namespace)
            .finish()
    }
}

#[async_trait]
impl ClusterClient for PodClient {
    type E = Error;

    async fn create_pod(&self, pod: Pod) -> Result<Pod, Self::E> {
        let name = pod.metadata.name.clone().unwrap_or_default();
        trace!("creating pod '{}' in namespace '{}'", name, self.namespace);
        Ok(self
            .api
            .create(&PostParams::default(), &pod)
            .await
            .context(error::KubeApiCallForSnafu {
                operation: "create pod",
                name,
            })?)
    }

    async fn get_pod(&self, name: &str) -> Result<Pod, Self::E> {
        Ok(self
            .api
            .get(name)
            .await
            .context(error::KubeApiCallForSnafu {
                operation: "get pod",
                name,
            })?)
    }

    async fn delete_pod(&self, name: &str) -> Result<(), Self::E> {
        match self.api.delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => {
                debug!("pod '{}' was already deleted", name);
                Ok(())
            }
            Err(e) => Err(e)
                .context(error::KubeApiCallForSnafu {
                    operation: "delete pod",
                    name,
                })
                .map_err(Error::from),
        }
    }
}
