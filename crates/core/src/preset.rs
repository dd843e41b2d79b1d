//! Saved filter presets and the theme preference.

use crate::config::EngineConfig;
use crate::criteria::FilterCriteria;
use crate::error::SiftResult;
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named snapshot of filter controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPreset {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "filters", alias = "values")]
    pub values: FilterCriteria,
}

impl FilterPreset {
    /// Menu label: `"<name> (<date>)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.timestamp.format("%Y-%m-%d"))
    }
}

/// Persisted, append-only list of presets kept under one storage key.
#[derive(Debug)]
pub struct PresetStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PresetStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Use the preset key from `config`.
    pub fn with_config(store: S, config: &EngineConfig) -> Self {
        Self::new(store, config.presets_key.clone())
    }

    /// Every saved preset, oldest first.
    ///
    /// A stored list that does not parse is treated as empty.
    pub fn list(&self) -> SiftResult<Vec<FilterPreset>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(presets) => Ok(presets),
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "ignoring unreadable saved presets");
                Ok(Vec::new())
            }
        }
    }

    /// Append a preset stamped with the current time.
    ///
    /// A blank name aborts the save and returns `Ok(None)`.
    pub fn save(&mut self, name: &str, values: &FilterCriteria) -> SiftResult<Option<FilterPreset>> {
        self.save_at(name, values, Utc::now())
    }

    /// Append a preset with an explicit timestamp.
    pub fn save_at(
        &mut self,
        name: &str,
        values: &FilterCriteria,
        timestamp: DateTime<Utc>,
    ) -> SiftResult<Option<FilterPreset>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let preset = FilterPreset {
            name: name.to_string(),
            timestamp,
            values: values.clone(),
        };
        let mut presets = self.list()?;
        presets.push(preset.clone());
        self.write(&presets)?;
        tracing::info!(name, count = presets.len(), "saved filter preset");
        Ok(Some(preset))
    }

    /// Filter values of the preset at `index`; `None` when out of range.
    pub fn load(&self, index: usize) -> SiftResult<Option<FilterCriteria>> {
        Ok(self.list()?.into_iter().nth(index).map(|p| p.values))
    }

    /// Remove and return the preset at `index`; `None` when out of range.
    pub fn delete(&mut self, index: usize) -> SiftResult<Option<FilterPreset>> {
        let mut presets = self.list()?;
        if index >= presets.len() {
            return Ok(None);
        }
        let removed = presets.remove(index);
        self.write(&presets)?;
        Ok(Some(removed))
    }

    /// Give back the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    fn write(&mut self, presets: &[FilterPreset]) -> SiftResult<()> {
        let json = serde_json::to_string(presets)?;
        self.store.set(&self.key, &json)
    }
}

// ===== Theme =====

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Read the stored theme. Missing or unknown values give the default.
    pub fn load<S: KeyValueStore>(store: &S, key: &str) -> SiftResult<Self> {
        Ok(store
            .get(key)?
            .and_then(|value| value.parse().ok())
            .unwrap_or_default())
    }

    /// Persist this theme.
    pub fn save<S: KeyValueStore>(self, store: &mut S, key: &str) -> SiftResult<()> {
        store.set(key, self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {other}")),
        }
    }
}
