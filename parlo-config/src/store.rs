//! The persistent settings store.
//!
//! A flat name -> value table with a parallel table of defaults. Reads never
//! fail: an unset name falls back to its default, and a kind mismatch falls
//! back to the default with a warning. Writes report whether they changed
//! anything so callers can diff a save against the previous state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::ConfigError;
use crate::value::{SetOutcome, SettingKind, SettingValue};

/// Key/value settings store with typed accessors and TOML persistence.
pub struct SettingsStore {
    path: PathBuf,
    values: BTreeMap<String, SettingValue>,
    defaults: BTreeMap<String, SettingValue>,
}

impl SettingsStore {
    /// Create an empty store that persists to the default settings path.
    pub fn new() -> Self {
        Self::with_path(Self::settings_path())
    }

    /// Create an empty store that persists to `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: BTreeMap::new(),
            defaults: BTreeMap::new(),
        }
    }

    /// Default on-disk location of the settings file.
    pub fn settings_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("parlo").join("settings.toml")
        } else {
            PathBuf::from("settings.toml")
        }
    }

    /// The path this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Define a setting and its default value.
    ///
    /// The default fixes the setting's kind for the lifetime of the store.
    /// Redefining a name replaces the previous default with a warning.
    pub fn define(&mut self, name: impl Into<String>, default: SettingValue) {
        let name = name.into();
        if self.defaults.insert(name.clone(), default).is_some() {
            log::warn!("Setting '{name}' defined twice; later default wins");
        }
    }

    /// The declared kind of a defined setting.
    pub fn kind_of(&self, name: &str) -> Option<SettingKind> {
        self.defaults.get(name).map(SettingValue::kind)
    }

    // =========================================================================
    // Typed reads (infallible; fall back to defaults)
    // =========================================================================

    pub fn get_string(&self, name: &str) -> String {
        match self.lookup(name, SettingKind::Str) {
            Some(SettingValue::Str(s)) => s.clone(),
            _ => String::new(),
        }
    }

    pub fn get_long(&self, name: &str) -> i64 {
        match self.lookup(name, SettingKind::Long) {
            Some(SettingValue::Long(n)) => *n,
            _ => 0,
        }
    }

    pub fn get_bool(&self, name: &str) -> bool {
        match self.lookup(name, SettingKind::Bool) {
            Some(SettingValue::Bool(b)) => *b,
            _ => false,
        }
    }

    pub fn get_list(&self, name: &str) -> Vec<String> {
        match self.lookup(name, SettingKind::List) {
            Some(SettingValue::List(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn get_map(&self, name: &str) -> BTreeMap<String, String> {
        match self.lookup(name, SettingKind::Map) {
            Some(SettingValue::Map(map)) => map.clone(),
            _ => BTreeMap::new(),
        }
    }

    /// The store-side default for a string setting, for reset-to-default
    /// affordances in the UI.
    pub fn get_string_default(&self, name: &str) -> String {
        match self.defaults.get(name) {
            Some(SettingValue::Str(s)) => s.clone(),
            _ => String::new(),
        }
    }

    /// Resolve the effective value of `name`, guarding against kind drift.
    fn lookup(&self, name: &str, want: SettingKind) -> Option<&SettingValue> {
        if let Some(value) = self.values.get(name) {
            if value.kind() == want {
                return Some(value);
            }
            log::warn!(
                "Setting '{name}' holds a {} but was read as {want}; using default",
                value.kind()
            );
        }
        match self.defaults.get(name) {
            Some(default) if default.kind() == want => Some(default),
            Some(default) => {
                log::warn!(
                    "Setting '{name}' is defined as {} but was read as {want}",
                    default.kind()
                );
                None
            }
            None => {
                log::warn!("Setting '{name}' read but never defined");
                None
            }
        }
    }

    // =========================================================================
    // Typed writes (report Changed/Unchanged)
    // =========================================================================

    pub fn set_string(&mut self, name: &str, value: impl Into<String>) -> SetOutcome {
        self.set(name, SettingValue::Str(value.into()))
    }

    pub fn set_long(&mut self, name: &str, value: i64) -> SetOutcome {
        self.set(name, SettingValue::Long(value))
    }

    pub fn set_bool(&mut self, name: &str, value: bool) -> SetOutcome {
        self.set(name, SettingValue::Bool(value))
    }

    pub fn set_list(&mut self, name: &str, value: Vec<String>) -> SetOutcome {
        self.set(name, SettingValue::List(value))
    }

    pub fn set_map(&mut self, name: &str, value: BTreeMap<String, String>) -> SetOutcome {
        self.set(name, SettingValue::Map(value))
    }

    /// Write `value`, comparing against the current effective value so that
    /// re-saving an unchanged setting reports `Unchanged`.
    fn set(&mut self, name: &str, value: SettingValue) -> SetOutcome {
        if let Some(kind) = self.kind_of(name)
            && kind != value.kind()
        {
            log::warn!(
                "Refusing to write {} value to {kind} setting '{name}'",
                value.kind()
            );
            return SetOutcome::Unchanged;
        }

        let current = self.values.get(name).or_else(|| self.defaults.get(name));
        if current == Some(&value) {
            return SetOutcome::Unchanged;
        }
        self.values.insert(name.to_string(), value);
        SetOutcome::Changed
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Load stored values from the settings file, if it exists.
    ///
    /// A missing file is not an error; the store simply serves defaults.
    ///
    /// Returns `anyhow::Result` for caller convenience; the underlying error
    /// is always a [`ConfigError`] and can be recovered with `downcast_ref`.
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            log::info!("Settings file not found at {:?}, using defaults", self.path);
            return Ok(());
        }
        log::info!("Loading settings from {:?}", self.path);
        let contents = fs::read_to_string(&self.path).map_err(ConfigError::Io)?;
        self.values = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        Ok(())
    }

    /// Save all explicitly set values to the settings file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let text = toml::to_string_pretty(&self.values).map_err(ConfigError::Serialize)?;
        fs::write(&self.path, text).map_err(ConfigError::Io)?;
        log::info!("Saved {} settings to {:?}", self.values.len(), self.path);
        Ok(())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
