use serde::Deserialize;
use std::time::Duration;

/// Test settings provides a way to send arguments into the Rust tests using environment variables.
pub(super) struct TestSettings {}

impl TestSettings {
    /// The path or name of the `kind` binary.
    pub(super) fn kind_path() -> &'static str {
        TEST_SETTINGS.kind_path.as_str()
    }

    /// How long to wait for a new cluster to accept pods.
    pub(super) fn ready_timeout() -> Duration {
        Duration::from_secs(TEST_SETTINGS.ready_timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename = "SCREAMING_SNAKE_CASE")]
struct Inner {
    /// The path to the [kind] binary. Defaults to `kind` (i.e. by default the kind binary is
    /// expected to be found via `$PATH`).
    ///
    /// # Example
    ///
    /// ```text
    /// E2E_SELFTEST_KIND_PATH=/wherever/kind
    /// ```
    ///
    /// [kind]: https://kind.sigs.k8s.io/
    #[serde(default = "kind")]
    kind_path: String,

    /// Seconds to wait for the `default` service account of a new cluster. Defaults to 120.
    #[serde(default = "ready_timeout_secs")]
    ready_timeout_secs: u64,
}

lazy_static::lazy_static! {
    static ref TEST_SETTINGS: Inner =
        envy::prefixed("E2E_SELFTEST_")
            .from_env::<Inner>()
            .expect("Error parsing TestSettings environment variables");
}

/// We need these to provide defaults for serde.
fn kind() -> String {
    String::from("kind")
}

fn ready_timeout_secs() -> u64 {
    120
}
