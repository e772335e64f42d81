use crate::constants::POD_PHASE_PENDING;
use k8s_openapi::api::core::v1::Pod;

/// Provides some conveniences for querying the status of a `Pod`.
pub trait PodExt {
    /// Returns the pod's name, or `""` if the name is missing. A pod we fetched by name always
    /// has one, so we do away with the `Option` for convenience.
    fn pod_name(&self) -> &str;

    /// Returns `status.phase`, e.g. `Pending` or `Running`, if the kubelet has reported one.
    fn phase(&self) -> Option<&str>;

    /// Returns the restart count of the container named `container`, or `None` if there is no
    /// status for that container yet.
    fn restart_count(&self, container: &str) -> Option<i32>;

    /// A pod without a phase has not been looked at yet, which we treat the same as `Pending`.
    fn is_pending(&self) -> bool {
        matches!(self.phase(), None | Some(POD_PHASE_PENDING))
    }
}

impl PodExt for Pod {
    fn pod_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("")
    }

    fn phase(&self) -> Option<&str> {
        self.status.as_ref().and_then(|status| status.phase.as_deref())
    }

    fn restart_count(&self, container: &str) -> Option<i32> {
        self.status
            .as_ref()
            .and_then(|status| status.container_statuses.as_ref())
            .and_then(|statuses| statuses.iter().find(|status| status.name == container))
            .map(|status| status.restart_count)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use k8s_openapi::api::core::v1::{ContainerStatus, PodStatus};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn pod(phase: Option<&str>, restarts: &[(&str, i32)]) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some("liveness-exec".into()),
                ..ObjectMeta::default()
            },
            status: Some(PodStatus {
                phase: phase.map(String::from),
                container_statuses: Some(
                    restarts
                        .iter()
                        .map(|(name, count)| ContainerStatus {
                            name: name.to_string(),
                            restart_count: *count,
                            ..ContainerStatus::default()
                        })
                        .collect(),
                ),
                ..PodStatus::default()
            }),
            ..Pod::default()
        }
    }

    #[test]
    fn restart_count_by_container() {
        let pod = pod(Some("Running"), &[("sidecar", 7), ("liveness", 2)]);
        assert_eq!(pod.restart_count("liveness"), Some(2));
        assert_eq!(pod.restart_count("sidecar"), Some(7));
        assert_eq!(pod.restart_count("missing"), None);
    }

    #[test]
    fn pending_phase() {
        assert!(pod(None, &[]).is_pending());
        assert!(pod(Some("Pending"), &[]).is_pending());
        assert!(!pod(Some("Running"), &[]).is_pending());
        // A pod that failed before running is no longer pending.
        assert!(!pod(Some("Failed"), &[]).is_pending());
        assert!(Pod::default().is_pending());
    }

    #[test]
    fn name() {
        assert_eq!(pod(None, &[]).pod_name(), "liveness-exec");
        assert_eq!(Pod::default().pod_name(), "");
    }
}
