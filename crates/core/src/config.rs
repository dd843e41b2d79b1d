//! Engine configuration.

use crate::error::{SiftError, SiftResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tunables for a [`Session`](crate::Session).
///
/// Loadable from YAML; every field is optional and falls back to its default.
///
/// ```
/// use sheetsift_core::EngineConfig;
///
/// let config = EngineConfig::from_yaml_str("render_limit: 50\nhistogram_bins: 5\n").unwrap();
/// assert_eq!(config.render_limit, 50);
/// assert_eq!(config.top_categories, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rows shown in the display window over the filtered view.
    pub render_limit: usize,
    /// Sample transformations returned by a find/replace preview.
    pub preview_samples: usize,
    /// Categories kept by a categorical aggregation.
    pub top_categories: usize,
    /// Bins produced by a histogram aggregation.
    pub histogram_bins: usize,
    /// Storage key for saved filter presets.
    pub presets_key: String,
    /// Storage key for the theme preference.
    pub theme_key: String,
    /// Directory for the file-backed store. `None` uses the platform data dir.
    pub storage_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            render_limit: 100,
            preview_samples: 5,
            top_categories: 20,
            histogram_bins: 10,
            presets_key: "sheetsift.filters".to_string(),
            theme_key: "sheetsift.theme".to_string(),
            storage_dir: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(source: &str) -> SiftResult<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> SiftResult<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&source)
    }

    /// Check that every limit can produce a result.
    pub fn validate(&self) -> SiftResult<()> {
        if self.histogram_bins == 0 {
            return Err(SiftError::Config("histogram_bins must be at least 1".into()));
        }
        if self.top_categories == 0 {
            return Err(SiftError::Config("top_categories must be at least 1".into()));
        }
        if self.presets_key.is_empty() || self.theme_key.is_empty() {
            return Err(SiftError::Config("storage keys must not be empty".into()));
        }
        Ok(())
    }

    /// Directory used by the file-backed store.
    ///
    /// Falls back to `<data dir>/sheetsift`, then to `.sheetsift` in the
    /// working directory when the platform has no data dir.
    #[must_use]
    pub fn resolved_storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("sheetsift"))
                .unwrap_or_else(|| PathBuf::from(".sheetsift"))
        })
    }
}
