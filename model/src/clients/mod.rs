mod error;
mod factory;
mod http_status_code;
mod pod_client;

pub use error::{Error, Result};
pub use factory::{ClientFactory, PodClientFactory};
pub use http_status_code::{HttpStatusCode, StatusCode};
pub use pod_client::{ClusterClient, PodClient};
