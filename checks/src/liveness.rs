/*!

Liveness probe checks. A pod whose container is built to fail its liveness probe after a short
while is created from a template, and the check passes if the kubelet restarts that container
within the polling budget.

!*/

use crate::error::{self, Result};
use crate::pod::{wait_for_pod_not_pending, POD_WAIT_INTERVAL};
use e2e_driver::{poll_until, PollResult, PollSettings, TestContext};
use e2e_model::clients::ClusterClient;
use e2e_model::constants::{APP_MANAGED_BY, LABEL_TEST_NAME, MANAGED_BY};
use e2e_model::manifest::read_pod;
use e2e_model::{Pod, PodExt};
use log::{error, info};
use snafu::{ensure, ResultExt};
use std::time::Duration;
use uuid::Uuid;

/// Template with a `/healthz` http liveness probe.
pub const HTTP_LIVENESS_TEMPLATE: &str = "http-liveness.yaml";

/// Template with a `cat /tmp/health` exec liveness probe.
pub const EXEC_LIVENESS_TEMPLATE: &str = "exec-liveness.yaml";

/// The container whose restarts are counted.
pub const LIVENESS_CONTAINER: &str = "liveness";

/// Wait at most 48 * 5s = 4 minutes for the restart count to go up.
pub const RESTART_POLL: PollSettings = PollSettings::new(Duration::from_secs(5), 48);

const LIVENESS_DIRECTORY: &str = "liveness";

/// Runs the liveness check with the pod template `template` from the `liveness` manifest
/// directory. Returns `true` if the `liveness` container was restarted during the check.
///
/// The pod is deleted when the engine releases the test's cleanup scope, whether the check passed,
/// failed or timed out.
pub async fn run_liveness_test<C>(client: C, context: TestContext, template: &str) -> bool
where
    C: ClusterClient,
{
    match restart_count_increases(&client, &context, template).await {
        Ok(restarted) => restarted,
        Err(e) => {
            error!("{}", e);
            false
        }
    }
}

async fn restart_count_increases<C>(
    client: &C,
    context: &TestContext,
    template: &str,
) -> Result<bool>
where
    C: ClusterClient,
{
    let path = context.config().asset_path(&[LIVENESS_DIRECTORY, template]);
    let mut pod = read_pod(&path).context(error::TemplateSnafu { path: &path })?;
    ensure!(
        !pod.pod_name().is_empty(),
        error::TemplateNameSnafu { path: &path }
    );

    // A random suffix keeps leftovers of earlier or concurrent runs from getting in the way.
    let name = format!("{}-{}", pod.pod_name(), Uuid::new_v4());
    pod.metadata.name = Some(name.clone());
    label(&mut pod, context.name());

    info!("Creating pod {}", name);
    client.create_pod(pod).await.map_err(|e| {
        error::CreatePodSnafu {
            name: &name,
            message: e.to_string(),
        }
        .build()
    })?;

    let cleanup_client = client.clone();
    let cleanup_name = name.clone();
    context.cleanup().defer(format!("delete pod {}", name), async move {
        if let Err(e) = cleanup_client.delete_pod(&cleanup_name).await {
            error!("Unable to delete pod {}: {}", cleanup_name, e);
        }
    });

    let pod = wait_for_pod_not_pending(client, &name, POD_WAIT_INTERVAL)
        .await
        .map_err(|e| get_pod_error(&name, e))?;
    info!("Started pod {}", name);

    let initial = liveness_restarts(&pod);
    info!("Initial restart count of pod {} is {}", name, initial);

    let name = name.as_str();
    let result = poll_until(
        RESTART_POLL,
        &initial,
        move || async move {
            let pod = client
                .get_pod(name)
                .await
                .map_err(|e| get_pod_error(name, e))?;
            let restarts = liveness_restarts(&pod);
            info!("Restart count of pod {} is now {}", name, restarts);
            Ok::<_, error::Error>(restarts)
        },
        |initial, current| current > initial,
    )
    .await?;

    match result {
        PollResult::Satisfied(attempt) => {
            info!(
                "Restart count of pod {} increased from {} to {} during the test",
                name, initial, attempt.observed
            );
            Ok(true)
        }
        PollResult::Exhausted { .. } => {
            error!(
                "Did not see the restart count of pod {} increase from {} during the test",
                name, initial
            );
            Ok(false)
        }
    }
}

/// A container that has not reported a status yet has not restarted.
fn liveness_restarts(pod: &Pod) -> i32 {
    pod.restart_count(LIVENESS_CONTAINER).unwrap_or(0)
}

fn label(pod: &mut Pod, test_name: &str) {
    let labels = pod.metadata.labels.get_or_insert_with(Default::default);
    labels.insert(APP_MANAGED_BY.to_string(), MANAGED_BY.to_string());
    labels.insert(LABEL_TEST_NAME.to_string(), test_name.to_string());
}

fn get_pod_error<E>(name: &str, e: E) -> error::Error
where
    E: std::fmt::Display,
{
    error::GetPodSnafu {
        name,
        message: e.to_string(),
    }
    .build()
}
