//! User prompt utilities for interactive confirmation

use anyhow::Result;
use dialoguer::Confirm;

/// Ask user for yes/no confirmation
pub fn confirm(prompt: &str) -> Result<bool> {
    let result = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    Ok(result)
}

/// Confirm a destructive action unless the caller already agreed to it
pub fn confirm_destructive(prompt: &str, assume_yes: bool, enabled: bool) -> Result<bool> {
    if assume_yes || !enabled {
        return Ok(true);
    }

    confirm(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_skipped_when_assumed() {
        assert!(confirm_destructive("Delete?", true, true).unwrap());
        assert!(confirm_destructive("Delete?", false, false).unwrap());
    }
}
