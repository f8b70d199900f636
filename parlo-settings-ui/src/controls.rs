//! Concrete [`SettingControl`] implementations.
//!
//! Each control owns its widget buffer between `load` and `save`. Numeric
//! controls edit free text and parse on save: an unparsable buffer is
//! skipped with a warning and the stored value stays intact.

use std::collections::BTreeMap;

use parlo_config::{SetOutcome, SettingsStore};

use crate::list_selector::ListSelector;
use crate::registry::{SaveOutcome, SettingControl};
use crate::traits::DataFormatter;

const INPUT_WIDTH: f32 = 220.0;

fn outcome(set: SetOutcome) -> SaveOutcome {
    match set {
        SetOutcome::Changed => SaveOutcome::Changed,
        SetOutcome::Unchanged => SaveOutcome::Unchanged,
    }
}

/// Free-text string setting.
pub struct StringControl {
    name: &'static str,
    label: &'static str,
    buffer: String,
}

impl StringControl {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            buffer: String::new(),
        }
    }
}

impl SettingControl for StringControl {
    fn name(&self) -> &str {
        self.name
    }

    fn load(&mut self, store: &SettingsStore) {
        self.buffer = store.get_string(self.name);
    }

    fn save(&mut self, store: &mut SettingsStore) -> SaveOutcome {
        outcome(store.set_string(self.name, &self.buffer))
    }

    fn show(&mut self, ui: &mut egui::Ui, enabled: bool) {
        ui.add_enabled_ui(enabled, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.label);
                ui.add(egui::TextEdit::singleline(&mut self.buffer).desired_width(INPUT_WIDTH));
            });
        });
    }
}

/// String setting restricted to a fixed set of choices.
pub struct ChoiceControl {
    name: &'static str,
    label: &'static str,
    choices: Vec<&'static str>,
    selected: String,
}

impl ChoiceControl {
    pub fn new(name: &'static str, label: &'static str, choices: Vec<&'static str>) -> Self {
        Self {
            name,
            label,
            choices,
            selected: String::new(),
        }
    }
}

impl SettingControl for ChoiceControl {
    fn name(&self) -> &str {
        self.name
    }

    fn load(&mut self, store: &SettingsStore) {
        self.selected = store.get_string(self.name);
    }

    fn save(&mut self, store: &mut SettingsStore) -> SaveOutcome {
        outcome(store.set_string(self.name, &self.selected))
    }

    fn show(&mut self, ui: &mut egui::Ui, enabled: bool) {
        ui.add_enabled_ui(enabled, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.label);
                egui::ComboBox::from_id_salt(self.name)
                    .selected_text(self.selected.clone())
                    .show_ui(ui, |ui| {
                        for choice in &self.choices {
                            ui.selectable_value(
                                &mut self.selected,
                                (*choice).to_string(),
                                *choice,
                            );
                        }
                    });
            });
        });
    }
}

/// Integer setting edited as text and parsed on save.
pub struct LongControl {
    name: &'static str,
    label: &'static str,
    buffer: String,
}

impl LongControl {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            buffer: String::new(),
        }
    }
}

impl SettingControl for LongControl {
    fn name(&self) -> &str {
        self.name
    }

    fn load(&mut self, store: &SettingsStore) {
        self.buffer = store.get_long(self.name).to_string();
    }

    fn save(&mut self, store: &mut SettingsStore) -> SaveOutcome {
        match self.buffer.trim().parse::<i64>() {
            Ok(value) => outcome(store.set_long(self.name, value)),
            Err(_) => {
                log::warn!(
                    "setting '{}': '{}' is not a number, keeping stored value",
                    self.name,
                    self.buffer
                );
                SaveOutcome::Skipped
            }
        }
    }

    fn show(&mut self, ui: &mut egui::Ui, enabled: bool) {
        ui.add_enabled_ui(enabled, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.label);
                ui.add(egui::TextEdit::singleline(&mut self.buffer).desired_width(80.0));
            });
        });
    }
}

/// Checkbox setting. Its on-screen value feeds enablement rules.
pub struct BoolControl {
    name: &'static str,
    label: &'static str,
    value: bool,
}

impl BoolControl {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            value: false,
        }
    }
}

impl SettingControl for BoolControl {
    fn name(&self) -> &str {
        self.name
    }

    fn load(&mut self, store: &SettingsStore) {
        self.value = store.get_bool(self.name);
    }

    fn save(&mut self, store: &mut SettingsStore) -> SaveOutcome {
        outcome(store.set_bool(self.name, self.value))
    }

    fn show(&mut self, ui: &mut egui::Ui, enabled: bool) {
        ui.add_enabled_ui(enabled, |ui| {
            ui.checkbox(&mut self.value, self.label);
        });
    }

    fn bool_value(&self) -> Option<bool> {
        Some(self.value)
    }
}

/// String-list setting backed by a [`ListSelector`].
pub struct ListControl {
    name: &'static str,
    selector: ListSelector,
}

impl ListControl {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            selector: ListSelector::new(name, label),
        }
    }

    pub fn with_formatter(mut self, formatter: impl DataFormatter<String> + 'static) -> Self {
        self.selector = self.selector.with_formatter(formatter);
        self
    }
}

impl SettingControl for ListControl {
    fn name(&self) -> &str {
        self.name
    }

    fn load(&mut self, store: &SettingsStore) {
        self.selector.set_data(store.get_list(self.name));
    }

    fn save(&mut self, store: &mut SettingsStore) -> SaveOutcome {
        outcome(store.set_list(self.name, self.selector.get_data()))
    }

    fn show(&mut self, ui: &mut egui::Ui, enabled: bool) {
        ui.add_enabled_ui(enabled, |ui| {
            self.selector.show(ui);
        });
        self.selector.show_dialogs(ui.ctx());
    }
}

/// Key/value map setting edited as an inline grid with an add row.
pub struct MapControl {
    name: &'static str,
    label: &'static str,
    entries: Vec<(String, String)>,
    new_key: String,
    new_value: String,
    value_formatter: Option<Box<dyn DataFormatter<String>>>,
}

impl MapControl {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            entries: Vec::new(),
            new_key: String::new(),
            new_value: String::new(),
            value_formatter: None,
        }
    }

    /// Run values through `formatter` on save; entries whose value is
    /// rejected are dropped.
    pub fn with_value_formatter(
        mut self,
        formatter: impl DataFormatter<String> + 'static,
    ) -> Self {
        self.value_formatter = Some(Box::new(formatter));
        self
    }

    /// Entries with a non-empty key and an accepted value, last write per
    /// key winning.
    fn to_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .filter(|(k, _)| !k.trim().is_empty())
            .filter_map(|(k, v)| {
                let value = match &self.value_formatter {
                    Some(f) => f.format(v.clone())?,
                    None => v.clone(),
                };
                Some((k.trim().to_string(), value))
            })
            .collect()
    }
}

impl SettingControl for MapControl {
    fn name(&self) -> &str {
        self.name
    }

    fn load(&mut self, store: &SettingsStore) {
        self.entries = store.get_map(self.name).into_iter().collect();
        self.new_key.clear();
        self.new_value.clear();
    }

    fn save(&mut self, store: &mut SettingsStore) -> SaveOutcome {
        outcome(store.set_map(self.name, self.to_map()))
    }

    fn show(&mut self, ui: &mut egui::Ui, enabled: bool) {
        ui.add_enabled_ui(enabled, |ui| {
            ui.label(egui::RichText::new(self.label).strong());
            let mut remove: Option<usize> = None;
            egui::Grid::new(self.name)
                .num_columns(3)
                .min_col_width(120.0)
                .show(ui, |ui| {
                    for (row, (key, value)) in self.entries.iter_mut().enumerate() {
                        ui.add(egui::TextEdit::singleline(key).desired_width(120.0));
                        ui.add(egui::TextEdit::singleline(value).desired_width(160.0));
                        if ui.small_button("x").clicked() {
                            remove = Some(row);
                        }
                        ui.end_row();
                    }
                    ui.add(
                        egui::TextEdit::singleline(&mut self.new_key)
                            .hint_text("key")
                            .desired_width(120.0),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut self.new_value)
                            .hint_text("value")
                            .desired_width(160.0),
                    );
                    if ui.small_button("+").clicked() && !self.new_key.trim().is_empty() {
                        self.entries.push((
                            std::mem::take(&mut self.new_key),
                            std::mem::take(&mut self.new_value),
                        ));
                    }
                    ui.end_row();
                });
            if let Some(row) = remove {
                self.entries.remove(row);
            }
        });
    }
}
