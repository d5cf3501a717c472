//! Kubectl wrapper utilities

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::ProcessError;

const KUBECTL: &str = "kubectl";

fn kubectl_command(kubeconfig: Option<&Path>) -> Command {
    command_for(Path::new(KUBECTL), kubeconfig)
}

fn command_for(binary: &Path, kubeconfig: Option<&Path>) -> Command {
    let mut cmd = Command::new(binary);

    if let Some(kc) = kubeconfig {
        cmd.env("KUBECONFIG", kc);
    }

    cmd
}

/// Run kubectl and capture stdout
pub fn run_kubectl_output(
    args: &[&str],
    kubeconfig: Option<&Path>,
) -> Result<String, ProcessError> {
    let command = format!("{} {}", KUBECTL, args.join(" "));

    let output = kubectl_command(kubeconfig)
        .args(args)
        .output()
        .map_err(|source| ProcessError::Spawn {
            path: command.clone(),
            source,
        })?;

    if !output.status.success() {
        tracing::debug!(
            "{} failed: {}",
            command,
            String::from_utf8_lossy(&output.stderr)
        );
        return Err(ProcessError::Failed {
            path: command,
            status: output.status,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Feed a manifest to `kubectl <args> -f -`, streaming kubectl's output
pub fn pipe_manifest(
    args: &[&str],
    manifest: &[u8],
    kubeconfig: Option<&Path>,
) -> Result<(), ProcessError> {
    pipe_manifest_with(Path::new(KUBECTL), args, manifest, kubeconfig)
}

/// [`pipe_manifest`] with an explicit kubectl binary
pub fn pipe_manifest_with(
    binary: &Path,
    args: &[&str],
    manifest: &[u8],
    kubeconfig: Option<&Path>,
) -> Result<(), ProcessError> {
    let command = format!("{} {} -f -", binary.display(), args.join(" "));

    let mut child = command_for(binary, kubeconfig)
        .args(args)
        .args(["-f", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            path: command.clone(),
            source,
        })?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(manifest),
        None => Ok(()),
    };

    // stdin was dropped with the match arm, so kubectl already has EOF
    let status = child.wait().map_err(|source| ProcessError::Wait {
        path: command.clone(),
        source,
    })?;

    if let Err(source) = written {
        tracing::debug!("{} exited with {} after a failed write", command, status);
        return Err(ProcessError::Stdin {
            path: command,
            source,
        });
    }

    if !status.success() {
        return Err(ProcessError::Failed {
            path: command,
            status,
        });
    }

    Ok(())
}

/// Arguments for applying or deleting a manifest in `namespace`
pub fn manifest_args(namespace: &str, delete: bool) -> Vec<&str> {
    if delete {
        vec!["delete", "-n", namespace, "--ignore-not-found"]
    } else {
        vec!["apply", "-n", namespace]
    }
}
