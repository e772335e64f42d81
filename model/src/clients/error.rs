use crate::clients::{HttpStatusCode, StatusCode};
use snafu::Snafu;
use std::path::PathBuf;

/// The `Result` type returned by `clients`.
pub type Result<T> = std::result::Result<T, Error>;

/// The public error type returned by `clients`.
#[derive(Debug, Snafu)]
pub struct Error(InnerError);

/// The private error type returned by `clients`.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub(crate) enum InnerError {
    #[snafu(display("Error initializing the Kubernetes client: {}", source))]
    Initialization { source: kube::Error },

    #[snafu(display("Unable to infer the Kubernetes configuration: {}", source))]
    InferConfig {
        source: kube::config::InferConfigError,
    },

    #[snafu(display("Invalid API server address '{}': {}", host, source))]
    InvalidHost {
        host: String,
        source: http::uri::InvalidUri,
    },

    #[snafu(display("Unable to load kubeconfig: {}", source))]
    Kubeconfig {
        source: kube::config::KubeconfigError,
    },

    #[snafu(display("Unable to read kubeconfig '{}': {}", path.display(), source))]
    KubeconfigRead {
        path: PathBuf,
        source: kube::config::KubeconfigError,
    },

    #[snafu(display("Unable to {} for '{}': {}", operation, name, source))]
    KubeApiCallFor {
        /// What we were trying to do, e.g. 'create pod'.
        operation: String,
        /// The name of the k8s object we were trying to do this for, e.g. 'liveness-exec-1234'.
        name: String,
        /// The error from kube-rs.
        source: kube::Error,
    },
}

impl HttpStatusCode for InnerError {
    fn status_code(&self) -> Option<StatusCode> {
        match self {
            InnerError::Initialization { .. }
            | InnerError::InferConfig { .. }
            | InnerError::InvalidHost { .. }
            | InnerError::Kubeconfig { .. }
            | InnerError::KubeconfigRead { .. } => None,
            InnerError::KubeApiCallFor { source: e, .. } => e.status_code(),
        }
    }
}

impl HttpStatusCode for Error {
    fn status_code(&self) -> Option<StatusCode> {
        self.0.status_code()
    }
}
