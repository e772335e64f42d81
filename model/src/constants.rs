/// Helper macro to avoid retyping the base domain-like name of the driver when creating further
/// string constants from it. When given no parameters, this returns the base domain-like name.
/// When given a string literal parameter it adds `/parameter` to the end.
macro_rules! e2e {
    () => {
        "e2e.k8s.io"
    };
    ($s:literal) => {
        concat!(e2e!(), "/", $s)
    };
}

// System identifiers
pub const E2E: &str = e2e!();
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_PROVIDER: &str = "local";

// Label keys
pub const LABEL_TEST_NAME: &str = e2e!("test-name");

// Standard tags https://kubernetes.io/docs/concepts/overview/working-with-objects/common-labels/
pub const APP_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

// Values for the standard tags
pub const MANAGED_BY: &str = "e2e-driver";

// Pod phases https://kubernetes.io/docs/concepts/workloads/pods/pod-lifecycle/#pod-phase
pub const POD_PHASE_PENDING: &str = "Pending";
pub const POD_PHASE_RUNNING: &str = "Running";

// Paths, relative to the repository root
pub const MANIFESTS_DIRECTORY: &str = "manifests";
