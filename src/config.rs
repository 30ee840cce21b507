//! Editor configuration.
//!
//! Handles loading, validating, and merging `vox-edit.toml`. Stock defaults
//! are serialized to a TOML table, the user's file is merged on top of it key
//! by key, and the result is deserialized and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [crop]
//! shade_color = [255, 255, 255]  # Wash painted outside the crop selection
//! shade_alpha = 150              # Wash opacity (0-255)
//!
//! [session]
//! queue_capacity = 32            # Pending commands before producers block
//!
//! [output]
//! default_extension = "png"      # Used when --output has no extension
//!
//! [processing]
//! max_processes = 4              # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [crop]
//! shade_alpha = 200
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Shade;
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "vox-edit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Editor configuration loaded from `vox-edit.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Crop preview appearance.
    pub crop: CropConfig,
    /// Command queue settings.
    pub session: SessionConfig,
    /// Output file settings.
    pub output: OutputConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl EditorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "session.queue_capacity must be at least 1".into(),
            ));
        }
        let ext = self.output.default_extension.trim_start_matches('.');
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(
                "output.default_extension must be a plain extension like \"png\"".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Crop preview settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// RGB color of the wash outside the selection.
    pub shade_color: [u8; 3],
    /// Wash opacity, 0 (invisible) to 255 (solid).
    pub shade_alpha: u8,
}

impl Default for CropConfig {
    fn default() -> Self {
        let shade = Shade::default();
        Self {
            shade_color: shade.color.0,
            shade_alpha: shade.alpha,
        }
    }
}

impl CropConfig {
    pub fn shade(&self) -> Shade {
        Shade {
            color: Rgb(self.shade_color),
            alpha: self.shade_alpha,
        }
    }
}

/// Command queue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Maximum number of commands waiting for the editor.
    pub queue_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { queue_capacity: 32 }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Extension (and so format) used when the output path has none.
    pub default_extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_extension: "png".to_string(),
        }
    }
}

impl OutputConfig {
    /// `path`, with the default extension appended if it has none.
    pub fn resolve_path(&self, path: &Path) -> std::path::PathBuf {
        if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(self.default_extension.trim_start_matches('.'))
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel pixel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(EditorConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `vox-edit.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `vox-edit.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<EditorConfig, ConfigError> {
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(stock_defaults_value()?, overlay),
        None => stock_defaults_value()?,
    };
    let config: EditorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `vox-edit.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# vox-edit configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Crop preview
# ---------------------------------------------------------------------------
[crop]
# Color washed over everything outside the crop selection, as [r, g, b].
shade_color = [255, 255, 255]

# Opacity of the wash: 0 = invisible, 255 = solid.
shade_alpha = 150

# ---------------------------------------------------------------------------
# Session
# ---------------------------------------------------------------------------
[session]
# Commands that may wait for the editor before input blocks.
queue_capacity = 32

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Format used when --output has no extension.
default_extension = "png"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel pixel workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
