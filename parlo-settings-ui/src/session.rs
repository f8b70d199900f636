//! The settings window session.
//!
//! One [`SettingsSession`] owns everything the window needs: the backing
//! store, the control registry, the collection editors and the transient
//! dialog state. The embedding app creates one when the window opens and
//! drops it when the window closes; nothing here is global.

use anyhow::Result;
use parlo_config::{Hotkey, SettingValue, SettingsStore, Usericon};

use crate::enablement::{EnablementRule, disabled_settings};
use crate::registry::{ChangeSideEffect, SettingRegistry};
use crate::sidebar::{SettingsTab, show_sidebar};
use crate::tabs::usericons_tab::UsericonsTab;
use crate::tabs::{general_tab, hotkeys_tab, ignore_tab, notifications_tab, usericons_tab};

/// What the embedding app should do after rendering the window this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    None,
    /// The window was dismissed; drop the session.
    Close,
    /// Settings were saved with this side effect.
    Saved(ChangeSideEffect),
}

/// Dialog shown after a successful save, per its side effect.
enum PostSaveDialog {
    None,
    RestartNotice,
    ReconnectPrompt,
}

/// Owns the state of one open settings window.
pub struct SettingsSession {
    store: SettingsStore,
    registry: SettingRegistry,
    rules: Vec<EnablementRule>,
    hotkeys: hotkeys_tab::HotkeysTab,
    usericons: UsericonsTab,
    selected_tab: SettingsTab,
    status: Option<String>,
    post_save: PostSaveDialog,
    on_reconnect: Option<Box<dyn FnMut()>>,
}

impl SettingsSession {
    /// Declare every setting this window manages, with its default.
    pub fn define_settings(store: &mut SettingsStore) {
        store.define("laf", SettingValue::Str("system".into()));
        store.define("nickname", SettingValue::Str(String::new()));
        store.define("timeout_seconds", SettingValue::Long(30));
        store.define("membership_enabled", SettingValue::Bool(true));
        store.define("sounds_enabled", SettingValue::Bool(false));
        store.define("event_sounds", SettingValue::Map(Default::default()));
        store.define("ignored_users", SettingValue::List(Vec::new()));
        store.define("hotkeys", SettingValue::List(Vec::new()));
        store.define("usericons", SettingValue::List(Vec::new()));
    }

    /// Open a session against the default settings file.
    pub fn open() -> Result<Self> {
        let mut store = SettingsStore::new();
        Self::define_settings(&mut store);
        store.load()?;
        Ok(Self::with_store(store))
    }

    /// Build a session around an already loaded store.
    pub fn with_store(store: SettingsStore) -> Self {
        let mut registry = SettingRegistry::new();
        general_tab::register(&mut registry);
        notifications_tab::register(&mut registry);
        ignore_tab::register(&mut registry);
        registry.load_all(&store);

        let mut hotkeys = hotkeys_tab::HotkeysTab::new();
        hotkeys.editor.set_data(
            store
                .get_list("hotkeys")
                .iter()
                .filter_map(|e| Hotkey::parse_entry(e))
                .collect(),
        );

        let mut usericons = usericons_tab::UsericonsTab::new();
        usericons.editor.set_data(
            store
                .get_list("usericons")
                .iter()
                .filter_map(|e| Usericon::parse_entry(e))
                .collect(),
        );

        Self {
            store,
            registry,
            rules: notifications_tab::rules(),
            hotkeys,
            usericons,
            selected_tab: SettingsTab::default(),
            status: None,
            post_save: PostSaveDialog::None,
            on_reconnect: None,
        }
    }

    /// Callback invoked when the user accepts the post-save reconnect
    /// prompt.
    pub fn set_on_reconnect(&mut self, callback: impl FnMut() + 'static) {
        self.on_reconnect = Some(Box::new(callback));
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SettingsStore {
        &mut self.store
    }

    pub fn registry_mut(&mut self) -> &mut SettingRegistry {
        &mut self.registry
    }

    pub fn hotkeys_mut(&mut self) -> &mut crate::TableEditor<Hotkey> {
        &mut self.hotkeys.editor
    }

    pub fn usericons_mut(&mut self) -> &mut crate::TableEditor<Usericon> {
        &mut self.usericons.editor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Write every control and collection back to the store, persist the
    /// file and classify what the accumulated changes require.
    ///
    /// Saving twice in a row reports [`ChangeSideEffect::None`] the second
    /// time: only settings that actually changed value count.
    pub fn save(&mut self) -> ChangeSideEffect {
        let mut report = self.registry.save_all(&mut self.store);

        let hotkey_entries: Vec<String> = self
            .hotkeys
            .editor
            .get_data()
            .iter()
            .map(Hotkey::to_entry)
            .collect();
        if self.store.set_list("hotkeys", hotkey_entries).is_changed() {
            report.mark("hotkeys");
        }

        let usericon_entries: Vec<String> = self
            .usericons
            .editor
            .get_data()
            .iter()
            .map(Usericon::to_entry)
            .collect();
        if self.store.set_list("usericons", usericon_entries).is_changed() {
            report.mark("usericons");
        }

        let effect = self.registry.classify(&report.changed);

        match self.store.save() {
            Ok(()) => {
                self.status = None;
                self.post_save = match effect {
                    ChangeSideEffect::RestartRequired => PostSaveDialog::RestartNotice,
                    ChangeSideEffect::ReconnectRequired => PostSaveDialog::ReconnectPrompt,
                    ChangeSideEffect::None => PostSaveDialog::None,
                };
            }
            Err(e) => {
                log::error!("Failed to save settings: {e}");
                self.status = Some(format!("Could not save settings: {e}"));
            }
        }
        effect
    }

    fn any_dialog_open(&self) -> bool {
        self.hotkeys.editor.dialog_open()
            || self.usericons.editor.dialog_open()
            || !matches!(self.post_save, PostSaveDialog::None)
    }

    /// Render the settings window for this frame.
    pub fn show(&mut self, ctx: &egui::Context) -> SessionAction {
        let mut action = SessionAction::None;

        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(true)
            .default_size(egui::vec2(640.0, 440.0))
            .show(ctx, |ui| {
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(130.0);
                        if let Some(tab) = show_sidebar(ui, self.selected_tab) {
                            self.selected_tab = tab;
                        }
                    });
                    ui.separator();
                    ui.vertical(|ui| {
                        egui::ScrollArea::vertical()
                            .id_salt("settings_content")
                            .show(ui, |ui| {
                                self.show_tab(ui);
                            });
                    });
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        action = SessionAction::Saved(self.save());
                    }
                    if ui.button("Cancel").clicked() {
                        action = SessionAction::Close;
                    }
                    if let Some(status) = &self.status {
                        ui.colored_label(egui::Color32::LIGHT_RED, status);
                    }
                });
            });

        self.show_post_save_dialogs(ctx);

        // Escape closes the window unless a dialog is consuming it.
        if action == SessionAction::None
            && !self.any_dialog_open()
            && ctx.input(|i| i.key_pressed(egui::Key::Escape))
        {
            action = SessionAction::Close;
        }
        action
    }

    fn show_tab(&mut self, ui: &mut egui::Ui) {
        let disabled = disabled_settings(&self.rules, |name| self.registry.bool_value(name));
        match self.selected_tab {
            SettingsTab::General => general_tab::show(ui, &mut self.registry, &disabled),
            SettingsTab::Hotkeys => self.hotkeys.show(ui),
            SettingsTab::Usericons => self.usericons.show(ui),
            SettingsTab::Notifications => {
                notifications_tab::show(ui, &mut self.registry, &disabled)
            }
            SettingsTab::IgnoreList => ignore_tab::show(ui, &mut self.registry, &disabled),
        }
    }

    fn show_post_save_dialogs(&mut self, ctx: &egui::Context) {
        match self.post_save {
            PostSaveDialog::None => {}
            PostSaveDialog::RestartNotice => {
                let mut dismissed = false;
                egui::Window::new("Restart Required")
                    .collapsible(false)
                    .resizable(false)
                    .order(egui::Order::Foreground)
                    .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                    .show(ctx, |ui| {
                        ui.label("Some changes take effect after restarting Parlo.");
                        ui.add_space(8.0);
                        if ui.button("OK").clicked() {
                            dismissed = true;
                        }
                    });
                if dismissed {
                    self.post_save = PostSaveDialog::None;
                }
            }
            PostSaveDialog::ReconnectPrompt => {
                let mut choice: Option<bool> = None;
                egui::Window::new("Reconnect")
                    .collapsible(false)
                    .resizable(false)
                    .order(egui::Order::Foreground)
                    .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                    .show(ctx, |ui| {
                        ui.label("Reconnect now to apply the changed connection settings?");
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            if ui.button("Reconnect now").clicked() {
                                choice = Some(true);
                            }
                            if ui.button("Later").clicked() {
                                choice = Some(false);
                            }
                        });
                    });
                if let Some(reconnect) = choice {
                    if reconnect && let Some(callback) = &mut self.on_reconnect {
                        callback();
                    }
                    self.post_save = PostSaveDialog::None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SettingsSession {
        let mut store = SettingsStore::with_path("unused.toml");
        SettingsSession::define_settings(&mut store);
        SettingsSession::with_store(store)
    }

    #[test]
    fn fresh_session_save_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SettingsStore::with_path(dir.path().join("settings.toml"));
        SettingsSession::define_settings(&mut store);
        let mut session = SettingsSession::with_store(store);
        assert_eq!(session.save(), ChangeSideEffect::None);
    }

    #[test]
    fn collections_round_trip_through_list_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut store = SettingsStore::with_path(&path);
        SettingsSession::define_settings(&mut store);
        let mut session = SettingsSession::with_store(store);

        session.hotkeys_mut().begin_add(None);
        session
            .hotkeys_mut()
            .commit_candidate(Hotkey::new("Ctrl+R", "reply"));
        session.usericons_mut().begin_add(None);
        session
            .usericons_mut()
            .commit_candidate(Usericon::new("alice", "/icons/a.png"));
        assert_eq!(session.save(), ChangeSideEffect::None);

        let mut store = SettingsStore::with_path(&path);
        SettingsSession::define_settings(&mut store);
        store.load().unwrap();
        let session = SettingsSession::with_store(store);
        assert_eq!(
            session.hotkeys.editor.get_data(),
            vec![Hotkey::new("Ctrl+R", "reply")]
        );
        assert_eq!(
            session.usericons.editor.get_data(),
            vec![Usericon::new("alice", "/icons/a.png")]
        );
    }

    #[test]
    fn malformed_stored_entries_are_skipped() {
        let mut store = SettingsStore::with_path("unused.toml");
        SettingsSession::define_settings(&mut store);
        store.set_list(
            "hotkeys",
            vec!["Ctrl+R=reply".into(), "garbage".into(), "=bad".into()],
        );
        let session = SettingsSession::with_store(store);
        assert_eq!(session.hotkeys.editor.get_data().len(), 1);
    }

    #[test]
    fn save_failure_surfaces_as_status() {
        let dir = tempfile::tempdir().unwrap();
        // The parent "directory" is a regular file, so save cannot create it.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();

        let mut store = SettingsStore::with_path(blocker.join("settings.toml"));
        SettingsSession::define_settings(&mut store);
        let mut session = SettingsSession::with_store(store);
        session.save();
        assert!(session.status().is_some());
    }

    #[test]
    fn pending_preview_escalates_save_to_restart() {
        let mut session = session();
        // Point the store somewhere writable first.
        let dir = tempfile::tempdir().unwrap();
        *session.store_mut() = {
            let mut store = SettingsStore::with_path(dir.path().join("settings.toml"));
            SettingsSession::define_settings(&mut store);
            store
        };
        session.registry_mut().set_preview_applied(true);
        assert_eq!(session.save(), ChangeSideEffect::RestartRequired);
    }
}
