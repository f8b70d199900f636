//! Notifications tab: sound toggles and the per-event sound map.

use std::collections::BTreeSet;

use crate::controls::{BoolControl, MapControl};
use crate::enablement::EnablementRule;
use crate::registry::SettingRegistry;

/// Sound paths are stored trimmed; a blanked-out path drops the entry.
fn trim_sound_path(raw: String) -> Option<String> {
    let trimmed = raw.trim().to_string();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

pub fn register(registry: &mut SettingRegistry) {
    registry.register(Box::new(BoolControl::new("sounds_enabled", "Play sounds")));
    registry.register(Box::new(
        MapControl::new("event_sounds", "Sound per event:")
            .with_value_formatter(trim_sound_path),
    ));
}

/// The sound map is meaningless while sounds are off.
pub fn rules() -> Vec<EnablementRule> {
    vec![EnablementRule::requires(
        "sounds_enabled",
        vec!["event_sounds"],
    )]
}

pub fn show(ui: &mut egui::Ui, registry: &mut SettingRegistry, disabled: &BTreeSet<&str>) {
    ui.heading("Notifications");
    ui.add_space(8.0);
    for name in ["sounds_enabled", "event_sounds"] {
        registry.show_control(ui, name, !disabled.contains(name));
    }
}
