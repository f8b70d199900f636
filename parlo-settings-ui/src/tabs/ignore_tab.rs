//! Ignore list tab: nicknames whose messages are suppressed.

use std::collections::BTreeSet;

use crate::controls::ListControl;
use crate::registry::SettingRegistry;

/// Nicknames are stored trimmed; whitespace-only entries are dropped.
fn trim_nickname(raw: String) -> Option<String> {
    let trimmed = raw.trim().to_string();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

pub fn register(registry: &mut SettingRegistry) {
    registry.register(Box::new(
        ListControl::new("ignored_users", "Ignored nicknames:").with_formatter(trim_nickname),
    ));
}

pub fn show(ui: &mut egui::Ui, registry: &mut SettingRegistry, disabled: &BTreeSet<&str>) {
    ui.heading("Ignore List");
    ui.add_space(8.0);
    registry.show_control(ui, "ignored_users", !disabled.contains("ignored_users"));
}
