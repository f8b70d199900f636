//! General tab: appearance, identity and connection basics.

use std::collections::BTreeSet;

use crate::controls::{BoolControl, ChoiceControl, LongControl, StringControl};
use crate::registry::SettingRegistry;

pub const LAF_CHOICES: [&str; 3] = ["system", "light", "dark"];

/// Register this tab's controls and their side-effect classes.
pub fn register(registry: &mut SettingRegistry) {
    registry.register(Box::new(ChoiceControl::new(
        "laf",
        "Look and feel:",
        LAF_CHOICES.to_vec(),
    )));
    registry.register(Box::new(StringControl::new("nickname", "Nickname:")));
    registry.register(Box::new(LongControl::new(
        "timeout_seconds",
        "Server timeout (seconds):",
    )));
    registry.register(Box::new(BoolControl::new(
        "membership_enabled",
        "Share channel membership",
    )));

    // Swapping the look and feel mid-session leaves stale widget styling.
    registry.mark_restart("laf");
    registry.mark_reconnect("membership_enabled");
}

pub fn show(ui: &mut egui::Ui, registry: &mut SettingRegistry, disabled: &BTreeSet<&str>) {
    ui.heading("General");
    ui.add_space(8.0);
    for name in ["laf", "nickname", "timeout_seconds", "membership_enabled"] {
        registry.show_control(ui, name, !disabled.contains(name));
    }
    ui.add_space(8.0);
    if ui.button("Preview look and feel").clicked() {
        // The live UI now differs from the stored settings until restart.
        registry.set_preview_applied(true);
        log::info!("look and feel preview applied");
    }
}
