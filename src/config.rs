use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::labeling::select::BandPadding;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("config dir not found")]
    NoConfigDir,
}

/// Tunables for click label suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Recognizer language codes, e.g. `["por", "eng"]`.
    pub languages: Vec<String>,
    pub crop_min_width: u32,
    pub crop_min_height: u32,
    pub crop_width_ratio: f64,
    pub crop_height_ratio: f64,
    pub band_pad_min: f64,
    pub band_pad_ratio: f64,
    pub max_label_chars: usize,
    /// A space must sit past this index to be used as a break point.
    pub min_break_index: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            languages: vec!["por".to_string(), "eng".to_string()],
            crop_min_width: 180,
            crop_min_height: 100,
            crop_width_ratio: 0.22,
            crop_height_ratio: 0.16,
            band_pad_min: 4.0,
            band_pad_ratio: 0.6,
            max_label_chars: 80,
            min_break_index: 40,
        }
    }
}

impl SuggestConfig {
    pub fn band_padding(&self) -> BandPadding {
        BandPadding {
            min: self.band_pad_min,
            ratio: self.band_pad_ratio,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crop_min_width == 0 || self.crop_min_height == 0 {
            return Err(ConfigError::Invalid("crop minimum size must be positive".into()));
        }
        let ratios = [self.crop_width_ratio, self.crop_height_ratio, self.band_pad_ratio];
        if ratios.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err(ConfigError::Invalid("ratios must be positive".into()));
        }
        if !self.band_pad_min.is_finite() || self.band_pad_min < 0.0 {
            return Err(ConfigError::Invalid("band_pad_min must not be negative".into()));
        }
        if self.max_label_chars == 0 || self.min_break_index >= self.max_label_chars {
            return Err(ConfigError::Invalid(format!(
                "min_break_index ({}) must be below max_label_chars ({})",
                self.min_break_index, self.max_label_chars
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub suggest: SuggestConfig,
    /// `system`, `pt` or `en`; drives default step texts.
    pub language: String,
    /// Path of the tesseract binary; `None` looks it up on `PATH`.
    pub tesseract_bin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suggest: SuggestConfig::default(),
            language: "system".to_string(),
            tesseract_bin: None,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("homolog").join("config.json"))
}

impl Config {
    /// Loads the user config, falling back to defaults when it is missing or unusable.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unusable config");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.suggest.validate()?;
        Ok(config)
    }

    /// Writes the config to the user config dir, creating it if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
