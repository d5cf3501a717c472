//! Apply or remove raw manifests in a namespace

use std::path::Path;

use crate::error::{AdapterError, Result};
use crate::k8s::kubectl;

/// Apply (create or update) `contents` in `namespace`, or delete the objects
/// it describes when `delete` is set.
pub fn apply_manifest(
    namespace: &str,
    contents: &[u8],
    delete: bool,
    kubeconfig: Option<&Path>,
) -> Result<()> {
    apply_manifest_with(Path::new("kubectl"), namespace, contents, delete, kubeconfig)
}

/// [`apply_manifest`] through an explicit kubectl binary
pub fn apply_manifest_with(
    kubectl_binary: &Path,
    namespace: &str,
    contents: &[u8],
    delete: bool,
    kubeconfig: Option<&Path>,
) -> Result<()> {
    if delete {
        crate::log_info!("Deleting manifest objects from namespace {}", namespace);
    } else {
        crate::log_info!("Applying manifest to namespace {}", namespace);
    }

    kubectl::pipe_manifest_with(
        kubectl_binary,
        &kubectl::manifest_args(namespace, delete),
        contents,
        kubeconfig,
    )
    .map_err(|source| AdapterError::Manifest {
        namespace: namespace.to_string(),
        source,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::ProcessError;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    /// Records argv and stdin; succeeds once, then exits 3
    fn fake_kubectl(dir: &Path) -> PathBuf {
        let path = dir.join("kubectl");
        let d = dir.display();
        let script = format!(
            "#!/bin/sh\n\
             echo \"$@\" >> {d}/argv.txt\n\
             cat >> {d}/stdin.txt\n\
             if [ -f {d}/called ]; then exit 3; fi\n\
             touch {d}/called\n"
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_apply_then_failing_delete() {
        let dir = tempfile::tempdir().unwrap();
        let kubectl = fake_kubectl(dir.path());
        let manifest = b"apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: osm\n";

        apply_manifest_with(&kubectl, "osm-system", manifest, false, None).unwrap();

        let err = apply_manifest_with(&kubectl, "osm-system", manifest, true, None).unwrap_err();
        match err {
            AdapterError::Manifest { namespace, source } => {
                assert_eq!(namespace, "osm-system");
                match source {
                    ProcessError::Failed { status, .. } => assert_eq!(status.code(), Some(3)),
                    other => panic!("expected exit failure, got {:?}", other),
                }
            }
            other => panic!("expected manifest error, got {:?}", other),
        }

        let argv = fs::read_to_string(dir.path().join("argv.txt")).unwrap();
        assert_eq!(
            argv.lines().collect::<Vec<_>>(),
            vec![
                "apply -n osm-system -f -",
                "delete -n osm-system --ignore-not-found -f -",
            ]
        );

        let stdin = fs::read(dir.path().join("stdin.txt")).unwrap();
        assert_eq!(stdin, [&manifest[..], &manifest[..]].concat());
    }
}
