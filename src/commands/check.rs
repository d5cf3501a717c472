//! Prerequisite check command

use anyhow::{Result, bail};

use crate::config::Settings;
use crate::k8s::kubectl;
use crate::utils::{CommonPrereqs, Prerequisite};

/// Handle check command
pub fn check(settings: &Settings) -> Result<()> {
    crate::log_info!("Checking prerequisites...");

    let kubectl_prereq = CommonPrereqs::kubectl();
    let install_script = CommonPrereqs::script(&settings.scripts.install);
    let delete_script = CommonPrereqs::script(&settings.scripts.delete);

    let prereqs: [&dyn Prerequisite; 3] = [&kubectl_prereq, &install_script, &delete_script];
    let (found, missing) = CommonPrereqs::check_all(&prereqs);

    for path in &found {
        println!("  ✓ {}", path.display());
    }

    if kubectl_prereq.check().is_ok() {
        match kubectl::run_kubectl_output(&["config", "current-context"], None) {
            Ok(context) => println!("  kube context: {}", context.trim()),
            Err(e) => crate::log_warn!("No usable kube context: {:#}", anyhow::Error::new(e)),
        }
    }

    if missing.is_empty() {
        crate::log_info!("✓ All prerequisites satisfied!");
        return Ok(());
    }

    for (name, hint) in &missing {
        println!("  ✗ {} ({})", name, hint);
    }

    bail!("{} prerequisite(s) missing", missing.len())
}
