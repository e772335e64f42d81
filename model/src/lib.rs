/*!

This library provides the run configuration, the pod manifest loader, and the Kubernetes clients
used by the end-to-end checks.

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

pub use configuration::RunConfiguration;
pub use error::{Error, Result};
pub use k8s_openapi::api::core::v1::Pod;
pub use pod_ext::PodExt;

pub mod clients;
mod configuration;
pub mod constants;
mod error;
pub mod manifest;
mod pod_ext;
