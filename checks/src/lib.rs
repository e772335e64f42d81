/*!

The end-to-end checks and the registry the driver picks them from.

Every check is a [`TestSpec`] whose body takes a [`ClusterClient`], so the same checks run
against a real cluster through [`PodClient`](e2e_model::clients::PodClient) or against a mock in
tests.

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]

mod error;
mod liveness;
mod pod;

pub use liveness::{
    run_liveness_test, EXEC_LIVENESS_TEMPLATE, HTTP_LIVENESS_TEMPLATE, LIVENESS_CONTAINER,
    RESTART_POLL,
};
pub use pod::{wait_for_pod_not_pending, POD_WAIT_INTERVAL};

use e2e_driver::{TestContext, TestSpec};
use e2e_model::clients::ClusterClient;

/// Every check the driver knows about, in registration order.
pub fn all_tests<C>() -> Vec<TestSpec<C>>
where
    C: ClusterClient,
{
    vec![
        // Restarts with a /healthz http liveness probe.
        TestSpec::new("TestLivenessHttp", |client: C, context: TestContext| async move {
            run_liveness_test(client, context, HTTP_LIVENESS_TEMPLATE).await
        }),
        // Restarts with a `cat /tmp/health` exec liveness probe.
        TestSpec::new("TestLivenessExec", |client: C, context: TestContext| async move {
            run_liveness_test(client, context, EXEC_LIVENESS_TEMPLATE).await
        }),
    ]
}
