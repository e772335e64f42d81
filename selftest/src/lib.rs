/*!

Provides utilities for running the end-to-end checks against a throwaway cluster created with
`kind` and `docker`. We call this testing modality `selftest` to distinguish it from running the
driver against a real cluster.

!*/

pub mod cluster;
mod test_settings;

pub use cluster::Cluster;
