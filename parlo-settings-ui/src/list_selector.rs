//! Editable single-column string list.
//!
//! Lighter-weight sibling of [`TableEditor`](crate::TableEditor) for flat
//! string collections: add/edit/remove/reorder plus two bulk operations,
//! an edit-all dialog over the newline-joined list and a confirmed
//! destructive alphabetic sort.
//!
//! Every commit path runs the optional [`DataFormatter`]; entries the
//! formatter rejects (`None` or empty) are dropped silently, and so are
//! entries equal to one already in the list.

use crate::traits::DataFormatter;

/// Widget used by the single-entry dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    SingleLine,
    MultiLine,
}

enum ListEditState {
    Idle,
    /// Single-entry dialog. `index` is `None` when adding.
    EditEntry {
        index: Option<usize>,
        buffer: String,
    },
    /// Whole-list dialog over the newline-joined entries.
    EditAll { buffer: String },
    /// Sort confirmation; the sort reorders permanently.
    ConfirmSort,
}

/// Editable string list with entry dialogs and bulk operations.
pub struct ListSelector {
    id: &'static str,
    label: &'static str,
    items: Vec<String>,
    selected: Option<usize>,
    state: ListEditState,
    formatter: Option<Box<dyn DataFormatter<String>>>,
    entry_mode: EntryMode,
}

impl ListSelector {
    pub fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            items: Vec::new(),
            selected: None,
            state: ListEditState::Idle,
            formatter: None,
            entry_mode: EntryMode::SingleLine,
        }
    }

    /// Attach a commit-time formatter.
    pub fn with_formatter(mut self, formatter: impl DataFormatter<String> + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Use a multiline widget in the single-entry dialog.
    pub fn with_multiline_entries(mut self) -> Self {
        self.entry_mode = EntryMode::MultiLine;
        self
    }

    pub fn entry_mode(&self) -> EntryMode {
        self.entry_mode
    }

    pub fn set_data(&mut self, items: Vec<String>) {
        self.items = items;
        self.selected = None;
        self.state = ListEditState::Idle;
    }

    pub fn get_data(&self) -> Vec<String> {
        self.items.clone()
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, row: Option<usize>) {
        self.selected = row.filter(|&r| r < self.items.len());
    }

    fn is_idle(&self) -> bool {
        matches!(self.state, ListEditState::Idle)
    }

    /// Run the formatter, treating `None` and empty results as rejection.
    fn format(&self, raw: String) -> Option<String> {
        let value = match &self.formatter {
            Some(f) => f.format(raw)?,
            None => raw,
        };
        if value.is_empty() { None } else { Some(value) }
    }

    // =========================================================================
    // Entry dialog
    // =========================================================================

    pub fn begin_add(&mut self) {
        if self.is_idle() {
            self.state = ListEditState::EditEntry {
                index: None,
                buffer: String::new(),
            };
        }
    }

    pub fn begin_edit(&mut self) {
        if !self.is_idle() {
            return;
        }
        if let Some(row) = self.selected
            && let Some(item) = self.items.get(row)
        {
            self.state = ListEditState::EditEntry {
                index: Some(row),
                buffer: item.clone(),
            };
        }
    }

    /// Commit the entry dialog with `text`. A rejected value closes the
    /// dialog without touching the list; so does a value already present
    /// on another row.
    pub fn commit_entry(&mut self, text: &str) {
        let ListEditState::EditEntry { index, .. } =
            std::mem::replace(&mut self.state, ListEditState::Idle)
        else {
            return;
        };
        let Some(value) = self.format(text.to_string()) else {
            return;
        };
        let duplicate = self
            .items
            .iter()
            .enumerate()
            .any(|(i, item)| Some(i) != index && *item == value);
        if duplicate {
            return;
        }
        match index {
            None => {
                let row = self.selected.map(|r| r + 1).unwrap_or(0);
                self.items.insert(row, value);
                self.selected = Some(row);
            }
            Some(row) => {
                if row < self.items.len() {
                    self.items[row] = value;
                }
            }
        }
    }

    pub fn cancel_dialog(&mut self) {
        self.state = ListEditState::Idle;
    }

    // =========================================================================
    // Row operations
    // =========================================================================

    pub fn remove_selected(&mut self) {
        if !self.is_idle() {
            return;
        }
        let Some(row) = self.selected else { return };
        if row >= self.items.len() {
            return;
        }
        self.items.remove(row);
        self.selected = if row < self.items.len() {
            Some(row)
        } else if !self.items.is_empty() {
            Some(self.items.len() - 1)
        } else {
            None
        };
    }

    pub fn move_up(&mut self) {
        if let Some(row) = self.selected
            && row > 0
            && self.is_idle()
        {
            self.items.swap(row - 1, row);
            self.selected = Some(row - 1);
        }
    }

    pub fn move_down(&mut self) {
        if let Some(row) = self.selected
            && row + 1 < self.items.len()
            && self.is_idle()
        {
            self.items.swap(row, row + 1);
            self.selected = Some(row + 1);
        }
    }

    // =========================================================================
    // Bulk operations
    // =========================================================================

    pub fn begin_edit_all(&mut self) {
        if self.is_idle() {
            self.state = ListEditState::EditAll {
                buffer: self.items.join("\n"),
            };
        }
    }

    /// Commit the edit-all dialog: one entry per line, each run through the
    /// formatter, rejected lines dropped, repeated lines kept once in
    /// first-occurrence order, the whole list replaced at once.
    pub fn commit_edit_all(&mut self, text: &str) {
        let ListEditState::EditAll { .. } =
            std::mem::replace(&mut self.state, ListEditState::Idle)
        else {
            return;
        };
        let mut items: Vec<String> = Vec::new();
        for line in text.lines() {
            if let Some(value) = self.format(line.to_string())
                && !items.contains(&value)
            {
                items.push(value);
            }
        }
        self.items = items;
        self.selected = None;
    }

    pub fn request_sort(&mut self) {
        if self.is_idle() && self.items.len() > 1 {
            self.state = ListEditState::ConfirmSort;
        }
    }

    pub fn confirm_sort(&mut self) {
        if matches!(self.state, ListEditState::ConfirmSort) {
            self.items
                .sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
            self.selected = None;
            self.state = ListEditState::Idle;
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let dialog_open = !self.is_idle();
        let mut clicked: Option<usize> = None;
        let mut action: Option<fn(&mut Self)> = None;

        ui.add_enabled_ui(!dialog_open, |ui| {
            ui.label(egui::RichText::new(self.label).strong());
            ui.horizontal(|ui| {
                egui::ScrollArea::vertical()
                    .id_salt(self.id)
                    .max_height(180.0)
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            for (row, item) in self.items.iter().enumerate() {
                                if ui
                                    .selectable_label(self.selected == Some(row), item)
                                    .clicked()
                                {
                                    clicked = Some(row);
                                }
                            }
                        });
                    });

                ui.vertical(|ui| {
                    if ui.button("Add").clicked() {
                        action = Some(Self::begin_add);
                    }
                    let has_selection = self.selected.is_some();
                    ui.add_enabled_ui(has_selection, |ui| {
                        if ui.button("Edit").clicked() {
                            action = Some(Self::begin_edit);
                        }
                        if ui.button("Remove").clicked() {
                            action = Some(Self::remove_selected);
                        }
                        if ui.button("Up").clicked() {
                            action = Some(Self::move_up);
                        }
                        if ui.button("Down").clicked() {
                            action = Some(Self::move_down);
                        }
                    });
                    ui.separator();
                    if ui.button("Sort").clicked() {
                        action = Some(Self::request_sort);
                    }
                    if ui.button("Edit All").clicked() {
                        action = Some(Self::begin_edit_all);
                    }
                });
            });
        });

        if let Some(row) = clicked {
            self.selected = Some(row);
        }
        if let Some(action) = action {
            action(self);
        }
    }

    /// Render any open dialog. Called with the egui context after the tab
    /// body has been laid out.
    pub fn show_dialogs(&mut self, ctx: &egui::Context) {
        enum Done {
            Entry(String),
            All(String),
            Sort,
            Cancel,
        }
        let mut done: Option<Done> = None;

        match &mut self.state {
            ListEditState::Idle => return,
            ListEditState::EditEntry { index, buffer } => {
                let title = if index.is_some() {
                    "Edit Entry"
                } else {
                    "Add Entry"
                };
                egui::Window::new(title)
                    .collapsible(false)
                    .resizable(false)
                    .order(egui::Order::Foreground)
                    .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                    .show(ctx, |ui| {
                        match self.entry_mode {
                            EntryMode::SingleLine => {
                                ui.add(
                                    egui::TextEdit::singleline(buffer).desired_width(240.0),
                                );
                            }
                            EntryMode::MultiLine => {
                                ui.add(
                                    egui::TextEdit::multiline(buffer)
                                        .desired_width(240.0)
                                        .desired_rows(4),
                                );
                            }
                        }
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            if ui.button("OK").clicked() {
                                done = Some(Done::Entry(buffer.clone()));
                            }
                            if ui.button("Cancel").clicked() {
                                done = Some(Done::Cancel);
                            }
                        });
                    });
            }
            ListEditState::EditAll { buffer } => {
                egui::Window::new("Edit All")
                    .collapsible(false)
                    .resizable(false)
                    .order(egui::Order::Foreground)
                    .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                    .show(ctx, |ui| {
                        ui.label("One entry per line:");
                        ui.add(
                            egui::TextEdit::multiline(buffer)
                                .desired_width(280.0)
                                .desired_rows(10),
                        );
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            if ui.button("OK").clicked() {
                                done = Some(Done::All(buffer.clone()));
                            }
                            if ui.button("Cancel").clicked() {
                                done = Some(Done::Cancel);
                            }
                        });
                    });
            }
            ListEditState::ConfirmSort => {
                egui::Window::new("Sort List")
                    .collapsible(false)
                    .resizable(false)
                    .order(egui::Order::Foreground)
                    .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                    .show(ctx, |ui| {
                        ui.label("Sort the list alphabetically? The current order is lost.");
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            if ui.button("Sort").clicked() {
                                done = Some(Done::Sort);
                            }
                            if ui.button("Cancel").clicked() {
                                done = Some(Done::Cancel);
                            }
                        });
                    });
            }
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            done = Some(Done::Cancel);
        }

        match done {
            Some(Done::Entry(text)) => self.commit_entry(&text),
            Some(Done::All(text)) => self.commit_edit_all(&text),
            Some(Done::Sort) => self.confirm_sort(),
            Some(Done::Cancel) => self.cancel_dialog(),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trim_formatter(raw: String) -> Option<String> {
        let trimmed = raw.trim().to_string();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }

    fn selector() -> ListSelector {
        let mut s = ListSelector::new("test", "Entries").with_formatter(trim_formatter);
        s.set_data(vec!["alpha".into(), "beta".into()]);
        s
    }

    #[test]
    fn add_inserts_after_selection_with_formatting() {
        let mut s = selector();
        s.select(Some(0));
        s.begin_add();
        s.commit_entry("  gamma  ");
        assert_eq!(s.get_data(), vec!["alpha", "gamma", "beta"]);
        assert_eq!(s.selected_row(), Some(1));
    }

    #[test]
    fn rejected_entry_is_dropped_silently() {
        let mut s = selector();
        s.begin_add();
        s.commit_entry("   ");
        assert_eq!(s.get_data(), vec!["alpha", "beta"]);
    }

    #[test]
    fn duplicate_entry_is_rejected_silently() {
        let mut s = selector();
        s.begin_add();
        s.commit_entry("alpha");
        assert_eq!(s.get_data(), vec!["alpha", "beta"]);

        // Formatting runs before the membership check.
        s.begin_add();
        s.commit_entry("  beta  ");
        assert_eq!(s.get_data(), vec!["alpha", "beta"]);
    }

    #[test]
    fn edit_colliding_with_another_row_is_rejected() {
        let mut s = selector();
        s.select(Some(1));
        s.begin_edit();
        s.commit_entry("alpha");
        assert_eq!(s.get_data(), vec!["alpha", "beta"]);

        // Re-committing a row's own value is not a collision.
        s.begin_edit();
        s.commit_entry("beta");
        assert_eq!(s.get_data(), vec!["alpha", "beta"]);
    }

    #[test]
    fn edit_replaces_in_place() {
        let mut s = selector();
        s.select(Some(1));
        s.begin_edit();
        s.commit_entry("bravo");
        assert_eq!(s.get_data(), vec!["alpha", "bravo"]);
    }

    #[test]
    fn remove_reselects_previous_at_end() {
        let mut s = selector();
        s.select(Some(1));
        s.remove_selected();
        assert_eq!(s.get_data(), vec!["alpha"]);
        assert_eq!(s.selected_row(), Some(0));
        s.remove_selected();
        assert_eq!(s.selected_row(), None);
    }

    #[test]
    fn moves_swap_neighbours() {
        let mut s = selector();
        s.select(Some(0));
        s.move_down();
        assert_eq!(s.get_data(), vec!["beta", "alpha"]);
        assert_eq!(s.selected_row(), Some(1));
        s.move_down();
        assert_eq!(s.get_data(), vec!["beta", "alpha"]);
    }

    #[test]
    fn edit_all_round_trips_through_newlines() {
        let mut s = selector();
        s.begin_edit_all();
        let ListEditState::EditAll { buffer } = &s.state else {
            panic!("expected edit-all state");
        };
        assert_eq!(buffer, "alpha\nbeta");
        let buffer = buffer.clone();
        s.commit_edit_all(&buffer);
        assert_eq!(s.get_data(), vec!["alpha", "beta"]);
    }

    #[test]
    fn edit_all_formats_and_drops_rejected_lines() {
        let mut s = selector();
        s.begin_edit_all();
        s.commit_edit_all("  one \n\n   \ntwo\n three ");
        assert_eq!(s.get_data(), vec!["one", "two", "three"]);
        assert_eq!(s.selected_row(), None);
    }

    #[test]
    fn edit_all_keeps_first_occurrence_of_repeated_lines() {
        let mut s = selector();
        s.begin_edit_all();
        s.commit_edit_all("one\ntwo\n one \nthree\ntwo");
        assert_eq!(s.get_data(), vec!["one", "two", "three"]);
    }

    #[test]
    fn multiline_entries_keep_embedded_newlines() {
        let mut s = ListSelector::new("test", "Entries").with_multiline_entries();
        assert_eq!(s.entry_mode(), EntryMode::MultiLine);
        s.begin_add();
        s.commit_entry("line one\nline two");
        assert_eq!(s.get_data(), vec!["line one\nline two"]);
    }

    #[test]
    fn sort_needs_confirmation() {
        let mut s = ListSelector::new("test", "Entries");
        s.set_data(vec!["Charlie".into(), "alpha".into(), "Bravo".into()]);
        s.request_sort();
        // Nothing happens until confirmed.
        assert_eq!(s.get_data(), vec!["Charlie", "alpha", "Bravo"]);
        s.confirm_sort();
        assert_eq!(s.get_data(), vec!["alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn cancelled_sort_keeps_order() {
        let mut s = selector();
        s.request_sort();
        s.cancel_dialog();
        s.confirm_sort();
        assert_eq!(s.get_data(), vec!["alpha", "beta"]);
    }
}
