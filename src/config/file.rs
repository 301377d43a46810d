//! Configuration file management for wavebars.
//!
//! This module handles loading and saving application configuration from TOML files.
//! Configuration is stored in the user's config directory.

use crate::waveform::{BarStyle, RenderMode};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Terminal viewer behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Input poll and redraw interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Seconds the simulated playhead takes to sweep the whole waveform
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
}

fn default_tick_ms() -> u64 {
    50
}

fn default_duration_secs() -> f64 {
    30.0
}

impl ViewerConfig {
    /// The playhead sweep time as a `Duration`.
    ///
    /// # Errors
    /// - If `duration_secs` is negative, not finite or too large for a `Duration`
    pub fn duration(&self) -> anyhow::Result<Duration> {
        Duration::try_from_secs_f64(self.duration_secs).map_err(|e| {
            anyhow!(
                "viewer.duration_secs is out of range (got {}): {e}",
                self.duration_secs
            )
        })
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            duration_secs: default_duration_secs(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WavebarsConfig {
    #[serde(default)]
    pub bars: BarStyle,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

impl WavebarsConfig {
    /// Loads configuration from the user's config directory.
    ///
    /// Falls back to defaults when no config file exists yet.
    ///
    /// # Errors
    /// - If the config directory cannot be determined
    /// - If the config file exists but cannot be read or parsed
    /// - If the loaded values fail validation
    pub fn load() -> anyhow::Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            tracing::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from a specific file.
    ///
    /// # Errors
    /// - If the file cannot be read
    /// - If the TOML is malformed or contains an invalid colour
    /// - If the values fail validation
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: WavebarsConfig = toml::from_str(&config_content)
            .map_err(|e| anyhow!("Invalid config file {}: {e}", path.display()))?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks bar style and viewer constraints.
    ///
    /// # Errors
    /// - If the bar style is invalid
    /// - If the viewer tick or duration is not positive
    pub fn validate(&self) -> anyhow::Result<()> {
        self.bars.validate()?;
        if self.viewer.tick_ms == 0 {
            return Err(anyhow!("viewer.tick_ms must be greater than 0"));
        }
        if !(self.viewer.duration_secs.is_finite() && self.viewer.duration_secs > 0.0) {
            return Err(anyhow!(
                "viewer.duration_secs must be a positive number (got {})",
                self.viewer.duration_secs
            ));
        }
        self.viewer.duration()?;
        Ok(())
    }

    /// Applies command-line overrides and revalidates.
    ///
    /// # Errors
    /// - If the resulting configuration is invalid
    pub fn with_overrides(
        mut self,
        mode: Option<RenderMode>,
        bar_count: Option<usize>,
        duration_secs: Option<f64>,
    ) -> anyhow::Result<Self> {
        if let Some(mode) = mode {
            self.bars.mode = mode;
        }
        if let Some(bar_count) = bar_count {
            self.bars.bar_count = bar_count;
        }
        if let Some(duration_secs) = duration_secs {
            self.viewer.duration_secs = duration_secs;
        }
        self.validate()?;
        Ok(self)
    }

    /// Writes configuration to a specific file, creating parent directories.
    ///
    /// # Errors
    /// - If serialization fails
    /// - If the file or its directory cannot be written
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_content = toml::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Retrieves the path to the config file.
///
/// # Errors
/// - If the home directory cannot be determined
pub fn get_config_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home.join(".config").join("wavebars").join("wavebars.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::HexColor;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: WavebarsConfig = toml::from_str("").unwrap();
        assert_eq!(config, WavebarsConfig::default());
        assert_eq!(config.bars.bar_count, 100);
        assert_eq!(config.bars.bar_margin, 1.0);
        assert_eq!(config.bars.shadow_ratio, 0.4);
        assert_eq!(config.bars.mode, RenderMode::Discrete);
    }

    #[test]
    fn test_partial_bars_section() {
        let config: WavebarsConfig = toml::from_str(
            r##"
            [bars]
            bar_count = 48
            played_color = "#0074D9"
            mode = "smooth"
            "##,
        )
        .unwrap();

        assert_eq!(config.bars.bar_count, 48);
        assert_eq!(config.bars.played_color, HexColor::rgb(0x00, 0x74, 0xd9));
        assert_eq!(config.bars.mode, RenderMode::Smooth);
        assert_eq!(config.bars.default_color, BarStyle::default().default_color);
        assert_eq!(config.viewer, ViewerConfig::default());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("wavebars.toml");

        let mut config = WavebarsConfig::default();
        config.bars.bar_count = 64;
        config.bars.mode = RenderMode::Smooth;
        config.viewer.duration_secs = 12.5;
        config.save_to(&path).unwrap();

        assert_eq!(WavebarsConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wavebars.toml");

        for content in [
            "[bars]\nbar_count = 0\n",
            "[bars]\nhover_color = \"red\"\n",
            "[bars]\nmode = \"gradient\"\n",
            "[bars]\nbar_margin = -2.0\n",
            "[viewer]\ntick_ms = 0\n",
            "[viewer]\nduration_secs = 0.0\n",
            "[viewer]\nduration_secs = 1e300\n",
        ] {
            fs::write(&path, content).unwrap();
            assert!(
                WavebarsConfig::load_from(&path).is_err(),
                "accepted {content:?}"
            );
        }
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let config = WavebarsConfig::default()
            .with_overrides(Some(RenderMode::Smooth), Some(12), None)
            .unwrap();
        assert_eq!(config.bars.mode, RenderMode::Smooth);
        assert_eq!(config.bars.bar_count, 12);
        assert_eq!(config.viewer.duration_secs, 30.0);

        assert!(WavebarsConfig::default()
            .with_overrides(None, Some(0), None)
            .is_err());
        assert!(WavebarsConfig::default()
            .with_overrides(None, None, Some(-1.0))
            .is_err());
        assert!(WavebarsConfig::default()
            .with_overrides(None, None, Some(1e300))
            .is_err());
    }

    #[test]
    fn test_viewer_duration_conversion() {
        let viewer = ViewerConfig {
            duration_secs: 12.5,
            ..ViewerConfig::default()
        };
        assert_eq!(viewer.duration().unwrap(), Duration::from_millis(12_500));

        let viewer = ViewerConfig {
            duration_secs: 1e300,
            ..ViewerConfig::default()
        };
        assert!(viewer.duration().is_err());
    }
}
