//! `wavebars config`: edit the configuration file in place.

use crate::config::{get_config_path, WavebarsConfig};
use anyhow::{anyhow, Context};
use std::process::Command;

/// Editors tried, in order, when `$EDITOR` is unset or empty.
const FALLBACK_EDITORS: [&str; 2] = ["nano", "vi"];

/// Opens the config file in an editor, seeding it with defaults on first use.
///
/// The file is parsed again afterwards so a broken edit is reported right away
/// instead of on the next `view`.
///
/// # Errors
/// - If the default config cannot be written
/// - If no editor can be found or it exits unsuccessfully
/// - If the edited file no longer validates
pub fn handle_config() -> anyhow::Result<()> {
    let config_path = get_config_path()?;
    if !config_path.exists() {
        WavebarsConfig::default().save_to(&config_path)?;
    }

    let editor = pick_editor(std::env::var("EDITOR").ok(), is_on_path)
        .ok_or_else(|| anyhow!("No editor found. Set the $EDITOR environment variable."))?;
    tracing::info!("Editing {} with {editor}", config_path.display());

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to launch editor '{editor}'"))?;
    if !status.success() {
        return Err(anyhow!("Editor '{editor}' exited with {status}"));
    }

    WavebarsConfig::load_from(&config_path)
        .with_context(|| format!("{} is no longer valid", config_path.display()))?;
    tracing::info!("Config file edited successfully");
    Ok(())
}

/// `$EDITOR` if set, otherwise the first fallback that `available` accepts.
fn pick_editor(from_env: Option<String>, available: impl Fn(&str) -> bool) -> Option<String> {
    from_env.filter(|e| !e.trim().is_empty()).or_else(|| {
        FALLBACK_EDITORS
            .into_iter()
            .find(|e| available(e))
            .map(str::to_string)
    })
}

fn is_on_path(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .output()
        .is_ok_and(|output| output.status.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_env_wins() {
        assert_eq!(
            pick_editor(Some("hx".to_string()), |_| true),
            Some("hx".to_string())
        );
    }

    #[test]
    fn test_editor_falls_back_in_order() {
        assert_eq!(pick_editor(None, |_| true), Some("nano".to_string()));
        assert_eq!(
            pick_editor(Some("  ".to_string()), |e| e == "vi"),
            Some("vi".to_string())
        );
        assert_eq!(pick_editor(None, |_| false), None);
    }
}
