//! Hotkeys tab: user-ordered action-to-chord bindings.
//!
//! Hotkey order is meaningful (earlier bindings win on chord lookup), so
//! the table is manually ordered with move buttons. Two bindings conflict
//! when their chords match, whatever the action, which is exactly the
//! item type's equality.

use parlo_config::Hotkey;

use crate::table_editor::TableEditor;
use crate::table_model::{Column, ListTableModel};
use crate::traits::{EditorContext, EditorResponse, ItemEditor};

/// Modal form producing one [`Hotkey`].
#[derive(Default)]
pub struct HotkeyEditor {
    temp_action: String,
    temp_key: String,
    editing: bool,
}

impl HotkeyEditor {
    fn is_valid(&self) -> bool {
        !self.temp_action.trim().is_empty() && !self.temp_key.trim().is_empty()
    }
}

impl ItemEditor<Hotkey> for HotkeyEditor {
    fn begin(&mut self, preset: Option<&Hotkey>, ctx: EditorContext) {
        self.editing = ctx.editing;
        match preset {
            Some(hotkey) => {
                self.temp_action = hotkey.action.clone();
                self.temp_key = hotkey.key.clone();
            }
            None => {
                self.temp_action.clear();
                self.temp_key.clear();
            }
        }
    }

    fn show(&mut self, ctx: &egui::Context) -> EditorResponse<Hotkey> {
        let mut response = EditorResponse::Pending;
        let title = if self.editing {
            "Edit Hotkey"
        } else {
            "Add Hotkey"
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Grid::new("hotkey_form")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Action:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.temp_action)
                                .desired_width(180.0),
                        );
                        ui.end_row();
                        ui.label("Key:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.temp_key).desired_width(180.0),
                        );
                        ui.end_row();
                    });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(self.is_valid(), |ui| {
                        if ui.button("OK").clicked() {
                            response = EditorResponse::Commit(Hotkey::new(
                                self.temp_key.trim(),
                                self.temp_action.trim(),
                            ));
                        }
                    });
                    if ui.button("Cancel").clicked() {
                        response = EditorResponse::Cancel;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            response = EditorResponse::Cancel;
        }
        response
    }
}

pub struct HotkeysTab {
    pub editor: TableEditor<Hotkey>,
}

impl Default for HotkeysTab {
    fn default() -> Self {
        Self::new()
    }
}

impl HotkeysTab {
    pub fn new() -> Self {
        let model = ListTableModel::new(vec![
            Column::new("Action", |h: &Hotkey| h.action.clone()),
            Column::new("Key", |h: &Hotkey| h.key.clone()),
        ]);
        Self {
            editor: TableEditor::new("hotkeys", model, Box::new(HotkeyEditor::default())),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.heading("Hotkeys");
        ui.add_space(8.0);
        self.editor.show(ui);
        self.editor.show_dialogs(ui.ctx());
    }
}
