use snafu::Snafu;
use std::path::PathBuf;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// The ways a check can go wrong before it reaches a verdict. Cluster client errors are carried
/// as their message since their type depends on the client.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub(crate) enum Error {
    #[snafu(display("Unable to load pod template '{}': {}", path.display(), source))]
    Template {
        path: PathBuf,
        source: e2e_model::Error,
    },

    #[snafu(display("Pod template '{}' does not name its pod", path.display()))]
    TemplateName { path: PathBuf },

    #[snafu(display("Failed to create pod {}: {}", name, message))]
    CreatePod { name: String, message: String },

    #[snafu(display("Get pod {} failed: {}", name, message))]
    GetPod { name: String, message: String },
}
