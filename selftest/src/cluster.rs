use crate::test_settings::TestSettings;
use anyhow::{format_err, Context, Result};
use e2e_model::constants::{DEFAULT_NAMESPACE, LABEL_TEST_NAME};
use e2e_model::{Pod, RunConfiguration};
use k8s_openapi::api::core::v1::ServiceAccount;
use kube::{
    api::ListParams,
    config::{KubeConfigOptions, Kubeconfig},
    Api, Client, Config,
};
use std::convert::TryInto;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::{sleep, Instant};

pub const KUBECONFIG_FILENAME: &str = "kubeconfig.yaml";

const READY_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Represents a `kind` cluster. The `Drop` trait is implemented deleting the `kind` cluster when it
/// goes out of scope.
#[derive(Debug)]
pub struct Cluster {
    name: String,
    kubeconfig_dir: TempDir,
}

impl Cluster {
    /// Creates a `Cluster` while initializing a kind cluster. If a cluster named `cluster_name`
    ///  already exists, it will be deleted.
    pub fn new(cluster_name: &str) -> Result<Cluster> {
        let kubeconfig_dir = TempDir::new()?;
        Self::delete_kind_cluster(cluster_name)?;
        Self::create_kind_cluster(
            cluster_name,
            &kubeconfig_dir.path().join(KUBECONFIG_FILENAME),
        )?;
        Ok(Self {
            name: cluster_name.into(),
            kubeconfig_dir,
        })
    }

    /// Returns the path to the kubeconfig file in the `TempDir` created for the cluster.
    pub fn kubeconfig(&self) -> PathBuf {
        self.kubeconfig_dir.path().join(KUBECONFIG_FILENAME)
    }

    /// A run configuration that points the driver at this cluster. Manifests are looked up under
    /// `repo_root`.
    pub fn run_configuration<P: Into<PathBuf>>(&self, repo_root: P) -> RunConfiguration {
        RunConfiguration {
            kubeconfig: Some(self.kubeconfig()),
            repo_root: repo_root.into(),
            ..RunConfiguration::default()
        }
    }

    /// Create the k8s client for the cluster.
    pub async fn k8s_client(&self) -> Result<Client> {
        let kubeconfig = Kubeconfig::read_from(self.kubeconfig())?;
        let config =
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?;
        Ok(config.try_into()?)
    }

    /// Pods are rejected until the `default` service account of the namespace exists, which can
    /// take a while after `kind create cluster` returns. Waits for it, up to the configured
    /// timeout.
    pub async fn wait_until_ready(&self) -> Result<()> {
        let client = self.k8s_client().await?;
        let accounts = Api::<ServiceAccount>::namespaced(client, DEFAULT_NAMESPACE);
        let deadline = Instant::now() + TestSettings::ready_timeout();
        loop {
            if accounts.get_opt("default").await?.is_some() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(format_err!(
                    "kind cluster '{}' was not ready within {:?}",
                    self.name,
                    TestSettings::ready_timeout()
                ));
            }
            sleep(READY_POLL_INTERVAL).await;
        }
    }

    /// Returns the pods, in the default namespace, that were created by the check `test_name`.
    pub async fn test_pods(&self, test_name: &str) -> Result<Vec<Pod>> {
        let client = self.k8s_client().await?;
        let pod_api = Api::<Pod>::namespaced(client, DEFAULT_NAMESPACE);
        let pods = pod_api
            .list(&ListParams {
                label_selector: Some(format!("{}={}", LABEL_TEST_NAME, test_name)),
                ..Default::default()
            })
            .await
            .with_context(|| format!("unable to list pods of test '{}'", test_name))?;
        Ok(pods.items)
    }

    fn create_kind_cluster(name: &str, kubeconfig: &Path) -> Result<()> {
        let kubeconfig = kubeconfig
            .to_str()
            .ok_or_else(|| format_err!("non utf-8 path '{}'", kubeconfig.to_string_lossy()))?;
        Self::kind(&[
            "--kubeconfig",
            kubeconfig,
            "create",
            "cluster",
            "--name",
            name,
        ])
    }

    fn delete_kind_cluster(name: &str) -> Result<()> {
        Self::kind(&["delete", "cluster", "--name", name])
    }

    fn kind(args: &[&str]) -> Result<()> {
        let output = Command::new(TestSettings::kind_path())
            .args(args)
            .output()
            .with_context(|| format!("unable to run '{}'", TestSettings::kind_path()))?;
        if !output.status.success() {
            return Err(format_err!(
                "'kind {}' failed with exit status '{}'\n\n{}\n\n{}",
                args.join(" "),
                output.status.code().unwrap_or(1),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr),
            ));
        }
        Ok(())
    }
}

impl Drop for Cluster {
    fn drop(&mut self) {
        if let Err(e) = Self::delete_kind_cluster(&self.name) {
            eprintln!("unable to delete kind cluster '{}': {}", self.name, e)
        }
    }
}
