//! User icons tab: per-user avatar images, sorted by username.
//!
//! The table auto-sorts case-insensitively by username and offers a live
//! regex filter over the username column. Deleting the image file behind
//! an entry is a filesystem operation; failures surface as inline status
//! text rather than dialogs.

use parlo_config::Usericon;

use crate::table_editor::TableEditor;
use crate::table_model::{Column, ListTableModel};
use crate::traits::{EditorContext, EditorResponse, ItemEditor};

/// Modal form producing one [`Usericon`].
#[derive(Default)]
pub struct UsericonEditor {
    temp_username: String,
    temp_image_path: String,
    editing: bool,
}

impl UsericonEditor {
    fn is_valid(&self) -> bool {
        !self.temp_username.trim().is_empty() && !self.temp_image_path.trim().is_empty()
    }
}

impl ItemEditor<Usericon> for UsericonEditor {
    fn begin(&mut self, preset: Option<&Usericon>, ctx: EditorContext) {
        self.editing = ctx.editing;
        match preset {
            Some(icon) => {
                self.temp_username = icon.username.clone();
                self.temp_image_path = icon.image_path.clone();
            }
            None => {
                self.temp_username.clear();
                self.temp_image_path.clear();
            }
        }
    }

    fn show(&mut self, ctx: &egui::Context) -> EditorResponse<Usericon> {
        let mut response = EditorResponse::Pending;
        let title = if self.editing {
            "Edit User Icon"
        } else {
            "Add User Icon"
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Grid::new("usericon_form")
                    .num_columns(3)
                    .show(ui, |ui| {
                        ui.label("Username:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.temp_username)
                                .desired_width(180.0),
                        );
                        ui.end_row();
                        ui.label("Image:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.temp_image_path)
                                .desired_width(180.0),
                        );
                        if ui.button("Browse...").clicked()
                            && let Some(path) = rfd::FileDialog::new()
                                .add_filter("Images", &["png", "jpg", "jpeg", "gif"])
                                .pick_file()
                        {
                            self.temp_image_path = path.display().to_string();
                        }
                        ui.end_row();
                    });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(self.is_valid(), |ui| {
                        if ui.button("OK").clicked() {
                            response = EditorResponse::Commit(Usericon::new(
                                self.temp_username.trim(),
                                self.temp_image_path.trim(),
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

pub struct UsericonsTab {
    pub editor: TableEditor<Usericon>,
    status: Option<String>,
}

impl Default for UsericonsTab {
    fn default() -> Self {
        Self::new()
    }
}

impl UsericonsTab {
    pub fn new() -> Self {
        let model = ListTableModel::sorted(
            vec![
                Column::new("Username", |u: &Usericon| u.username.clone()),
                Column::new("Image", |u: &Usericon| u.image_path.clone()),
            ],
            Usericon::cmp_by_username,
        )
        .with_search_column(0)
        .with_filter_column(0);
        Self {
            editor: TableEditor::new("usericons", model, Box::new(UsericonEditor::default())),
            status: None,
        }
    }

    /// Remove the selected entry's image file from disk. The entry itself
    /// stays; an io error becomes inline status text.
    pub fn delete_image_file(&mut self) {
        let Some(row) = self.editor.selected_row() else {
            return;
        };
        let Some(icon) = self.editor.get_data().into_iter().nth(row) else {
            return;
        };
        match std::fs::remove_file(&icon.image_path) {
            Ok(()) => {
                log::info!("deleted icon image {}", icon.image_path);
                self.status = None;
            }
            Err(e) => {
                log::warn!("failed to delete {}: {e}", icon.image_path);
                self.status = Some(format!("Could not delete {}: {e}", icon.image_path));
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.heading("User Icons");
        ui.add_space(8.0);
        self.editor.show(ui);
        ui.add_space(4.0);
        ui.add_enabled_ui(self.editor.selected_row().is_some(), |ui| {
            if ui.button("Delete image file").clicked() {
                self.delete_image_file();
            }
        });
        if let Some(status) = &self.status {
            ui.colored_label(egui::Color32::LIGHT_RED, status);
        }
        self.editor.show_dialogs(ui.ctx());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(username: &str, path: &str) -> Usericon {
        Usericon::new(username, path)
    }

    #[test]
    fn table_sorts_by_username_case_insensitively() {
        let mut tab = UsericonsTab::new();
        tab.editor.set_data(vec![
            icon("zelda", "z.png"),
            icon("Alice", "a.png"),
            icon("bob", "b.png"),
        ]);
        let names: Vec<String> = tab
            .editor
            .get_data()
            .iter()
            .map(|u| u.username.clone())
            .collect();
        assert_eq!(names, vec!["Alice", "bob", "zelda"]);
    }

    #[test]
    fn filter_narrows_by_username() {
        let mut tab = UsericonsTab::new();
        tab.editor.set_data(vec![
            icon("alice", "a.png"),
            icon("alicia", "a2.png"),
            icon("bob", "b.png"),
        ]);
        tab.editor.set_filter("^ali");
        assert_eq!(tab.editor.visible_rows(), vec![0, 1]);
        assert!(!tab.editor.can_mutate());
    }

    #[test]
    fn deleting_a_missing_image_sets_status() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.png").display().to_string();
        let mut tab = UsericonsTab::new();
        tab.editor.set_data(vec![icon("alice", &missing)]);
        tab.editor.select(Some(0));
        tab.delete_image_file();
        assert!(tab.status.is_some());
        // The entry is untouched either way.
        assert_eq!(tab.editor.get_data().len(), 1);
    }

    #[test]
    fn deleting_an_existing_image_clears_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        std::fs::write(&path, b"png").unwrap();
        let mut tab = UsericonsTab::new();
        tab.editor
            .set_data(vec![icon("alice", &path.display().to_string())]);
        tab.editor.select(Some(0));
        tab.delete_image_file();
        assert!(tab.status.is_none());
        assert!(!path.exists());
    }
}
