use e2e_model::clients::ClusterClient;
use e2e_model::{Pod, PodExt};
use log::info;
use std::time::Duration;
use tokio::time::sleep;

/// How long to wait between two looks at a pending pod.
pub const POD_WAIT_INTERVAL: Duration = Duration::from_secs(5);

/// Fetches the pod named `name` every `interval` until its phase is something other than
/// `Pending`, and returns it.
///
/// Waiting for "not pending" rather than for `Running` keeps a pod that fails on start from
/// blocking the check forever. There is no attempt limit; the per-test timeout bounds the wait.
pub async fn wait_for_pod_not_pending<C>(
    client: &C,
    name: &str,
    interval: Duration,
) -> Result<Pod, C::E>
where
    C: ClusterClient,
{
    loop {
        let pod = client.get_pod(name).await?;
        if !pod.is_pending() {
            return Ok(pod);
        }
        info!(
            "Waiting for pod {} to leave the Pending phase (phase: {})",
            name,
            pod.phase().unwrap_or("unknown")
        );
        sleep(interval).await;
    }
}
