//! Registry binding named settings to their UI controls.
//!
//! Each control owns its widget state and knows how to load itself from and
//! save itself to the [`SettingsStore`]. The registry tracks which setting
//! names require a client restart or a server reconnect when changed, and
//! classifies the union of changed names after a save pass.

use std::collections::BTreeSet;

use parlo_config::SettingsStore;

/// What a saved settings change requires of the running client.
///
/// Restart outranks reconnect: when one save touches settings from both
/// sets, only the restart notice is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSideEffect {
    None,
    ReconnectRequired,
    RestartRequired,
}

/// Per-control result of one save pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The stored value changed.
    Changed,
    /// The control's value matched what was already stored.
    Unchanged,
    /// The control's buffer could not be interpreted; the stored value was
    /// left alone.
    Skipped,
}

/// One named setting bound to a widget.
pub trait SettingControl {
    /// Store key this control edits.
    fn name(&self) -> &str;

    /// Refresh widget state from the store.
    fn load(&mut self, store: &SettingsStore);

    /// Write widget state back to the store.
    fn save(&mut self, store: &mut SettingsStore) -> SaveOutcome;

    /// Render the widget for this frame.
    fn show(&mut self, ui: &mut egui::Ui, enabled: bool);

    /// Current on-screen value for boolean controls, used by enablement
    /// rules. Non-boolean controls report `None`.
    fn bool_value(&self) -> Option<bool> {
        None
    }
}

/// Names changed by one save pass.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub changed: BTreeSet<String>,
}

impl SaveReport {
    pub fn mark(&mut self, name: &str) {
        self.changed.insert(name.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// All registered setting controls plus side-effect classification state.
pub struct SettingRegistry {
    controls: Vec<Box<dyn SettingControl>>,
    restart_names: BTreeSet<String>,
    reconnect_names: BTreeSet<String>,
    /// Set when a preview action already pushed an unsaved value into the
    /// live UI; a subsequent save then always requires a restart to get
    /// back to a clean state.
    preview_applied: bool,
}

impl Default for SettingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingRegistry {
    pub fn new() -> Self {
        Self {
            controls: Vec::new(),
            restart_names: BTreeSet::new(),
            reconnect_names: BTreeSet::new(),
            preview_applied: false,
        }
    }

    /// Register a control. Panics on a duplicate name: two controls bound
    /// to one key would silently overwrite each other on save.
    pub fn register(&mut self, control: Box<dyn SettingControl>) {
        assert!(
            !self.controls.iter().any(|c| c.name() == control.name()),
            "duplicate setting control: {}",
            control.name()
        );
        self.controls.push(control);
    }

    /// Mark a setting as requiring a client restart when changed.
    pub fn mark_restart(&mut self, name: &str) {
        self.restart_names.insert(name.to_string());
    }

    /// Mark a setting as requiring a server reconnect when changed.
    pub fn mark_reconnect(&mut self, name: &str) {
        self.reconnect_names.insert(name.to_string());
    }

    pub fn set_preview_applied(&mut self, applied: bool) {
        self.preview_applied = applied;
    }

    pub fn preview_applied(&self) -> bool {
        self.preview_applied
    }

    /// Refresh every control from the store.
    pub fn load_all(&mut self, store: &SettingsStore) {
        for control in &mut self.controls {
            control.load(store);
        }
    }

    /// Save every control, collecting the names that actually changed.
    /// Saving twice in a row yields an empty report.
    pub fn save_all(&mut self, store: &mut SettingsStore) -> SaveReport {
        let mut report = SaveReport::default();
        for control in &mut self.controls {
            match control.save(store) {
                SaveOutcome::Changed => report.mark(control.name()),
                SaveOutcome::Unchanged | SaveOutcome::Skipped => {}
            }
        }
        report
    }

    /// Classify a set of changed names into the action the client must
    /// take. A pending preview forces a restart even when nothing else
    /// changed.
    pub fn classify(&self, changed: &BTreeSet<String>) -> ChangeSideEffect {
        if self.preview_applied || changed.iter().any(|n| self.restart_names.contains(n)) {
            ChangeSideEffect::RestartRequired
        } else if changed.iter().any(|n| self.reconnect_names.contains(n)) {
            ChangeSideEffect::ReconnectRequired
        } else {
            ChangeSideEffect::None
        }
    }

    /// Render the control bound to `name`, if registered.
    pub fn show_control(&mut self, ui: &mut egui::Ui, name: &str, enabled: bool) {
        if let Some(control) = self.controls.iter_mut().find(|c| c.name() == name) {
            control.show(ui, enabled);
        } else {
            log::warn!("no control registered for setting '{name}'");
        }
    }

    /// On-screen value of a boolean control, for enablement rules.
    pub fn bool_value(&self, name: &str) -> Option<bool> {
        self.controls
            .iter()
            .find(|c| c.name() == name)
            .and_then(|c| c.bool_value())
    }
}
