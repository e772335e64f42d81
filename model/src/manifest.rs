/*!

Loading of declarative pod templates. A check reads a template, changes whatever it needs to
(typically the name) and then creates the pod through a [`ClusterClient`](crate::clients::ClusterClient).

!*/

use crate::error::{self, Result};
use k8s_openapi::api::core::v1::Pod;
use serde::Deserialize;
use snafu::{OptionExt, ResultExt};
use std::path::Path;

/// Takes a path to a YAML manifest holding a pod description and deserializes the first document
/// in it.
pub fn read_pod(path: &Path) -> Result<Pod> {
    let manifest_string =
        std::fs::read_to_string(path).context(error::ManifestReadSnafu { path })?;
    let pod = convert_pod(&manifest_string)?;
    Ok(pod.context(error::ManifestEmptySnafu { path })?)
}

/// Takes a `str` containing a YAML manifest and deserializes the first document as a `Pod`.
/// Returns `None` if the manifest holds no documents at all.
pub fn convert_pod(manifest: &str) -> Result<Option<Pod>> {
    if manifest.trim().is_empty() {
        return Ok(None);
    }
    let doc = match serde_yaml::Deserializer::from_str(manifest).next() {
        Some(doc) => doc,
        None => return Ok(None),
    };
    let value = serde_yaml::Value::deserialize(doc).context(error::SerdeYamlSnafu {
        action: "deserialize manifest",
    })?;
    if value.is_null() {
        return Ok(None);
    }
    let kind = value
        .get("kind")
        .and_then(|kind| kind.as_str())
        .unwrap_or_default();
    snafu::ensure!(
        kind == "Pod",
        error::WrongKindSnafu {
            kind: kind.to_string()
        }
    );
    let pod: Pod = serde_yaml::from_value(value).context(error::SerdeYamlSnafu {
        action: "deserialize pod",
    })?;
    Ok(Some(pod))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    const LIVENESS_POD: &str = r#"
apiVersion: v1
kind: Pod
metadata:
  name: liveness-http
  labels:
    test: liveness
spec:
  containers:
  - name: liveness
    image: registry.k8s.io/liveness
    args:
    - /server
"#;

    #[test]
    fn pod_from_str() {
        let pod = convert_pod(LIVENESS_POD).unwrap().unwrap();
        assert_eq!(pod.metadata.name.as_deref(), Some("liveness-http"));
        let containers = pod.spec.unwrap().containers;
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, "liveness");
    }

    #[test]
    fn empty_manifest() {
        assert!(convert_pod("").unwrap().is_none());
    }

    #[test]
    fn wrong_kind() {
        let manifest = "apiVersion: v1\nkind: Service\nmetadata:\n  name: foo\n";
        let err = convert_pod(manifest).unwrap_err();
        assert!(err.to_string().contains("Service"), "{}", err);
    }

    #[test]
    fn pod_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LIVENESS_POD.as_bytes()).unwrap();
        let pod = read_pod(file.path()).unwrap();
        assert_eq!(pod.metadata.name.as_deref(), Some("liveness-http"));
    }

    #[test]
    fn missing_file() {
        let err = read_pod(Path::new("/this/path/does/not/exist.yaml")).unwrap_err();
        assert!(err.to_string().contains("Unable to read manifest"), "{}", err);
    }
}
