use crate::constants::{DEFAULT_NAMESPACE, DEFAULT_PROVIDER, MANIFESTS_DIRECTORY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment and connection parameters for one invocation of the driver. It is built once by
/// the entry point, before any test runs, and then handed to every test by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfiguration {
    /// Path to the kubeconfig file. When `None` the client is inferred from the environment
    /// (`KUBECONFIG`, `~/.kube/config` or the in-cluster service account).
    pub kubeconfig: Option<PathBuf>,
    /// The kubeconfig context to use instead of the current one.
    pub context: Option<String>,
    /// Overrides the API server address found in the kubeconfig.
    pub host: Option<String>,
    /// The namespace that checks create their objects in.
    pub namespace: String,
    /// The cloud or infrastructure provider the cluster runs on, e.g. `gce` or `local`.
    pub provider: String,
    /// The repository root. Manifest templates are found relative to it.
    pub repo_root: PathBuf,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            host: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
            repo_root: PathBuf::from("."),
        }
    }
}

impl RunConfiguration {
    /// Returns the path of an asset under the repository's manifest directory, e.g.
    /// `asset_path(&["liveness", "exec-liveness.yaml"])`.
    pub fn asset_path<S: AsRef<str>>(&self, parts: &[S]) -> PathBuf {
        parts
            .iter()
            .fold(self.repo_root.join(MANIFESTS_DIRECTORY), |path, part| {
                path.join(part.as_ref())
            })
    }
}
