//! Studio configuration module.
//!
//! Handles loading and validating `moldura.toml`. Configuration is flat:
//! one optional file next to the assets, with stock defaults for every key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! asset_dir = "assets"      # Directory holding the overlay PNGs
//! output_dir = "exports"    # Where saved exports land
//!
//! [overlays]
//! feed = "SDC_Embaixador_feed.png"
//! story = "SDC_Embaixador_Story.png"
//! story_centered = "e77661f0-ee92-47aa-ba3b-055b36b8a166.png"
//!
//! [filenames]
//! feed = "MetodoIP_Confirmation.png"
//! story = "MetodoIP_Story_Confirmation.png"
//! story_centered = "MetodoIP_Confirmation.png"
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown
//! keys are rejected to catch typos early.

use crate::templates::{Template, TemplateId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Studio configuration loaded from `moldura.toml`.
///
/// All fields have stock defaults matching the shipped campaign assets.
/// User config files need only specify the values they want to override.
/// Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Directory holding the overlay PNG assets.
    pub asset_dir: String,
    /// Directory where saved exports land when no share target takes them.
    pub output_dir: String,
    /// Overlay asset filename per template variant.
    pub overlays: VariantNames,
    /// Export filename per template variant.
    pub filenames: VariantNames,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            asset_dir: "assets".to_string(),
            output_dir: "exports".to_string(),
            overlays: VariantNames::from_templates(|t| t.overlay_asset),
            filenames: VariantNames::from_templates(|t| t.export_filename),
        }
    }
}

/// One filename per template variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariantNames {
    pub feed: String,
    pub story: String,
    pub story_centered: String,
}

impl VariantNames {
    fn from_templates(pick: impl Fn(&'static Template) -> &'static str) -> Self {
        Self {
            feed: pick(Template::get(TemplateId::Feed)).to_string(),
            story: pick(Template::get(TemplateId::Story)).to_string(),
            story_centered: pick(Template::get(TemplateId::StoryCentered)).to_string(),
        }
    }

    pub fn get(&self, id: TemplateId) -> &str {
        match id {
            TemplateId::Feed => &self.feed,
            TemplateId::Story => &self.story,
            TemplateId::StoryCentered => &self.story_centered,
        }
    }
}

impl StudioConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.asset_dir.is_empty() {
            return Err(ConfigError::Validation("asset_dir must not be empty".into()));
        }
        if self.output_dir.is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        for id in TemplateId::ALL {
            if self.overlays.get(id).is_empty() {
                return Err(ConfigError::Validation(format!(
                    "overlays.{id} must not be empty"
                )));
            }
            if self.filenames.get(id).is_empty() {
                return Err(ConfigError::Validation(format!(
                    "filenames.{id} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Full path to a variant's overlay asset.
    pub fn overlay_path(&self, id: TemplateId) -> PathBuf {
        Path::new(&self.asset_dir).join(self.overlays.get(id))
    }

    /// Export filename for a variant.
    pub fn export_filename(&self, id: TemplateId) -> &str {
        self.filenames.get(id)
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load config from `moldura.toml` in the given directory.
///
/// Returns stock defaults when the file does not exist. Sparse files merge
/// on top of the defaults via serde; unknown keys are rejected; the result
/// is validated.
pub fn load_config(root: &Path) -> Result<StudioConfig, ConfigError> {
    let config_path = root.join("moldura.toml");
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        let mut config: StudioConfig = toml::from_str(&content)?;
        fill_sparse_names(&mut config);
        config
    } else {
        StudioConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// `#[serde(default)]` on [`VariantNames`] fills omitted names with empty
/// strings; replace those with the stock defaults so a sparse `[filenames]`
/// table overrides one variant without clearing the others.
fn fill_sparse_names(config: &mut StudioConfig) {
    let stock = StudioConfig::default();
    for (names, stock_names) in [
        (&mut config.overlays, &stock.overlays),
        (&mut config.filenames, &stock.filenames),
    ] {
        if names.feed.is_empty() {
            names.feed = stock_names.feed.clone();
        }
        if names.story.is_empty() {
            names.story = stock_names.story.clone();
        }
        if names.story_centered.is_empty() {
            names.story_centered = stock_names.story_centered.clone();
        }
    }
}

/// Returns a fully-commented stock `moldura.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Moldura Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# Directory holding the overlay PNG assets.
asset_dir = "assets"

# Where saved exports land when sharing is unavailable.
output_dir = "exports"

# ---------------------------------------------------------------------------
# Overlay assets (one per template variant)
# ---------------------------------------------------------------------------
[overlays]
feed = "SDC_Embaixador_feed.png"
story = "SDC_Embaixador_Story.png"
story_centered = "e77661f0-ee92-47aa-ba3b-055b36b8a166.png"

# ---------------------------------------------------------------------------
# Export filenames (one per template variant)
# ---------------------------------------------------------------------------
[filenames]
feed = "MetodoIP_Confirmation.png"
story = "MetodoIP_Story_Confirmation.png"
story_centered = "MetodoIP_Confirmation.png"
"##
}
