//! Generic CRUD editor over a [`ListTableModel`].
//!
//! Single-item editing is delegated to a pluggable [`ItemEditor`]; this type
//! owns the edit-attempt state machine around it:
//!
//! `Idle -> Editing -> { cancelled -> Idle | confirmed(candidate) }`, where a
//! confirmed candidate runs a duplicate check first. A candidate value-equal
//! to a *different* existing row opens a conflict dialog offering discard or
//! re-edit; anything else commits. Outside that conflict window the model
//! never contains two rows equal by the item type's equality.
//!
//! While an item editor or conflict dialog is open, the table itself is
//! rendered disabled, so the collection structurally cannot be mutated under
//! an open dialog.

use std::time::Instant;

use regex::{Regex, RegexBuilder};

use crate::search::{SearchBuffer, select_match};
use crate::table_model::ListTableModel;
use crate::traits::{EditorContext, EditorResponse, ItemEditor, TableEditorListener};

/// User resolution of a duplicate conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Drop the candidate; the collection stays as it was.
    Discard,
    /// Reopen the editor pre-filled with the candidate.
    ReEdit,
}

/// What kind of edit attempt is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditMode {
    Add,
    /// Editing the row at this model index.
    Edit(usize),
}

enum EditState<T> {
    Idle,
    Editing(EditMode),
    Conflict { candidate: T, mode: EditMode },
}

/// CRUD UI over an ordered collection with duplicate detection, type-ahead
/// search and (for sorted models) a live regex filter.
pub struct TableEditor<T: Clone + PartialEq> {
    id: &'static str,
    model: ListTableModel<T>,
    selected: Option<usize>,
    state: EditState<T>,
    editor: Box<dyn ItemEditor<T>>,
    listeners: Vec<Box<dyn TableEditorListener<T>>>,
    search: SearchBuffer,
    filter_text: String,
    filter: Option<Regex>,
    filter_error: Option<String>,
    last_clicked_column: Option<usize>,
}

impl<T: Clone + PartialEq> TableEditor<T> {
    pub fn new(id: &'static str, model: ListTableModel<T>, editor: Box<dyn ItemEditor<T>>) -> Self {
        let search_column = model.search_column();
        Self {
            id,
            model,
            selected: None,
            state: EditState::Idle,
            editor,
            listeners: Vec::new(),
            search: SearchBuffer::new(search_column),
            filter_text: String::new(),
            filter: None,
            filter_error: None,
            last_clicked_column: None,
        }
    }

    /// Subscribe to change notifications.
    pub fn add_listener(&mut self, listener: Box<dyn TableEditorListener<T>>) {
        self.listeners.push(listener);
    }

    // =========================================================================
    // Data access
    // =========================================================================

    /// Replace the entire backing sequence and reset editing state.
    pub fn set_data(&mut self, items: Vec<T>) {
        self.model.set_data(items);
        self.selected = None;
        self.state = EditState::Idle;
        self.search.clear();
        for l in &mut self.listeners {
            l.items_set();
        }
    }

    /// Defensive copy of the current sequence in current model order.
    pub fn get_data(&self) -> Vec<T> {
        self.model.get_data()
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, row: Option<usize>) {
        self.selected = row.filter(|&r| r < self.model.len());
    }

    /// Structural mutations are disabled while any filter text is present:
    /// with rows narrowed, view and model indices no longer line up.
    pub fn can_mutate(&self) -> bool {
        self.filter_text.is_empty()
    }

    fn is_idle(&self) -> bool {
        matches!(self.state, EditState::Idle)
    }

    /// True while an item editor or conflict dialog is open.
    pub fn dialog_open(&self) -> bool {
        !self.is_idle()
    }

    // =========================================================================
    // Edit attempts
    // =========================================================================

    /// Open the item editor in add mode, optionally pre-filled.
    pub fn begin_add(&mut self, preset: Option<T>) {
        if !self.can_mutate() || !self.is_idle() {
            return;
        }
        self.editor.begin(
            preset.as_ref(),
            EditorContext {
                editing: false,
                clicked_column: self.last_clicked_column,
            },
        );
        self.state = EditState::Editing(EditMode::Add);
    }

    /// Open the item editor on the selected row.
    pub fn begin_edit(&mut self) {
        if !self.can_mutate() || !self.is_idle() {
            return;
        }
        let Some(row) = self.selected else { return };
        let Some(item) = self.model.get(row).cloned() else {
            return;
        };
        self.editor.begin(
            Some(&item),
            EditorContext {
                editing: true,
                clicked_column: self.last_clicked_column,
            },
        );
        self.state = EditState::Editing(EditMode::Edit(row));
    }

    /// Dismiss the open editor without committing.
    pub fn cancel_edit(&mut self) {
        self.state = EditState::Idle;
    }

    /// Run the duplicate check on a confirmed candidate and either commit it
    /// or enter the conflict state.
    pub fn commit_candidate(&mut self, candidate: T) {
        let mode = match self.state {
            EditState::Editing(mode) => mode,
            _ => return,
        };
        let exclude = match mode {
            EditMode::Add => None,
            EditMode::Edit(row) => Some(row),
        };
        if self.model.duplicate_of(&candidate, exclude).is_some() {
            self.state = EditState::Conflict { candidate, mode };
            return;
        }
        self.apply_commit(candidate, mode);
    }

    /// Resolve a pending duplicate conflict.
    pub fn resolve_conflict(&mut self, choice: ConflictChoice) {
        let EditState::Conflict { candidate, mode } =
            std::mem::replace(&mut self.state, EditState::Idle)
        else {
            return;
        };
        match choice {
            ConflictChoice::Discard => {}
            ConflictChoice::ReEdit => {
                self.editor.begin(
                    Some(&candidate),
                    EditorContext {
                        editing: matches!(mode, EditMode::Edit(_)),
                        clicked_column: None,
                    },
                );
                self.state = EditState::Editing(mode);
            }
        }
    }

    fn apply_commit(&mut self, candidate: T, mode: EditMode) {
        match mode {
            EditMode::Add => {
                let row = self.model.insert(candidate.clone(), self.selected);
                self.selected = Some(row);
                for l in &mut self.listeners {
                    l.item_added(&candidate);
                }
            }
            EditMode::Edit(row) => {
                let (old, new_row) = self.model.replace(row, candidate.clone());
                self.selected = Some(new_row);
                for l in &mut self.listeners {
                    l.item_edited(&old, &candidate);
                }
            }
        }
        self.state = EditState::Idle;
    }

    // =========================================================================
    // Row operations
    // =========================================================================

    /// Delete the selected row, reselecting the same index if still valid,
    /// else the previous one, else nothing.
    pub fn remove_selected(&mut self) {
        if !self.is_idle() {
            return;
        }
        let Some(row) = self.selected else { return };
        if row >= self.model.len() {
            return;
        }
        let removed = self.model.remove(row);
        self.selected = if row < self.model.len() {
            Some(row)
        } else if self.model.len() > 0 {
            Some(self.model.len() - 1)
        } else {
            None
        };
        for l in &mut self.listeners {
            l.item_removed(&removed);
        }
    }

    pub fn move_up(&mut self) {
        self.move_selected(-1);
    }

    pub fn move_down(&mut self) {
        self.move_selected(1);
    }

    fn move_selected(&mut self, delta: isize) {
        if self.model.is_sorted() || !self.can_mutate() || !self.is_idle() {
            return;
        }
        let Some(row) = self.selected else { return };
        let target = row as isize + delta;
        if target < 0 || target as usize >= self.model.len() {
            return;
        }
        self.model.swap(row, target as usize);
        self.selected = Some(target as usize);
        let data = self.model.get_data();
        for l in &mut self.listeners {
            l.all_items_changed(&data);
        }
    }

    // =========================================================================
    // Search & filter
    // =========================================================================

    /// Feed one type-ahead keystroke, selecting the matching row if any.
    pub fn search_key(&mut self, ch: char, now: Instant) {
        let query = self.search.push(ch, now).to_string();
        let rows = self.model.visible_rows(self.filter.as_ref());
        let texts: Vec<String> = rows
            .iter()
            .map(|&r| self.model.cell_text(r, self.search.column()))
            .collect();
        if let Some(pos) = select_match(&texts, &query) {
            self.selected = Some(rows[pos]);
        }
    }

    pub fn search_backspace(&mut self) {
        self.search.backspace();
    }

    /// Retarget type-ahead to another column; a moved target resets the
    /// buffer. Clicking a cell retargets to its column.
    pub fn set_search_column(&mut self, column: usize) {
        if column < self.model.columns().len() {
            self.search.set_column(column);
        }
    }

    /// Feed raw input events into type-ahead. The table calls this only
    /// while it is hovered, idle and no widget holds keyboard focus.
    pub fn handle_search_input(&mut self, events: &[egui::Event], now: Instant) {
        for event in events {
            match event {
                egui::Event::Text(text) => {
                    for ch in text.chars() {
                        self.search_key(ch, now);
                    }
                }
                egui::Event::Key {
                    key: egui::Key::Backspace,
                    pressed: true,
                    ..
                } => self.search_backspace(),
                _ => {}
            }
        }
    }

    /// Update the live regex filter. Only meaningful on sorted models; an
    /// invalid pattern becomes inline status text, never an error path.
    pub fn set_filter(&mut self, text: &str) {
        self.filter_text = text.to_string();
        if text.is_empty() {
            self.filter = None;
            self.filter_error = None;
            return;
        }
        match RegexBuilder::new(text).case_insensitive(true).build() {
            Ok(re) => {
                self.filter = Some(re);
                self.filter_error = None;
            }
            Err(_) => {
                self.filter = None;
                self.filter_error = Some("invalid pattern".to_string());
            }
        }
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Model indices of the rows currently visible under the filter.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.model.visible_rows(self.filter.as_ref())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render the toolbar and table body. Dialogs are overlaid via
    /// [`show_dialogs`](Self::show_dialogs), which the session calls with the
    /// egui context after laying out the tab.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let dialog_open = !self.is_idle();

        ui.add_enabled_ui(!dialog_open, |ui| {
            self.show_toolbar(ui);
            self.show_rows(ui);
        });
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        let mut add_clicked = false;
        let mut edit_clicked = false;
        let mut remove_clicked = false;
        let mut up_clicked = false;
        let mut down_clicked = false;
        let mut filter_edit: Option<String> = None;

        ui.horizontal(|ui| {
            let can_mutate = self.can_mutate();
            let has_selection = self.selected.is_some();

            ui.add_enabled_ui(can_mutate, |ui| {
                if ui.button("Add").clicked() {
                    add_clicked = true;
                }
            });
            ui.add_enabled_ui(can_mutate && has_selection, |ui| {
                if ui.button("Edit").clicked() {
                    edit_clicked = true;
                }
                if ui.button("Remove").clicked() {
                    remove_clicked = true;
                }
            });

            if !self.model.is_sorted() {
                let row = self.selected.unwrap_or(0);
                ui.add_enabled_ui(can_mutate && has_selection && row > 0, |ui| {
                    if ui.small_button("Up").clicked() {
                        up_clicked = true;
                    }
                });
                ui.add_enabled_ui(
                    can_mutate && has_selection && row + 1 < self.model.len(),
                    |ui| {
                        if ui.small_button("Dn").clicked() {
                            down_clicked = true;
                        }
                    },
                );
            } else {
                ui.separator();
                ui.label("Filter:");
                let mut text = self.filter_text.clone();
                if ui
                    .add(egui::TextEdit::singleline(&mut text).desired_width(120.0))
                    .changed()
                {
                    filter_edit = Some(text);
                }
                if let Some(err) = &self.filter_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            }
        });

        if let Some(text) = filter_edit {
            self.set_filter(&text);
        }
        if add_clicked {
            self.begin_add(None);
        }
        if edit_clicked {
            self.begin_edit();
        }
        if remove_clicked {
            self.remove_selected();
        }
        if up_clicked {
            self.move_up();
        }
        if down_clicked {
            self.move_down();
        }
    }

    fn show_rows(&mut self, ui: &mut egui::Ui) {
        let rows = self.visible_rows();
        let column_count = self.model.columns().len();
        let mut clicked: Option<(usize, usize)> = None;
        let mut double_clicked = false;

        let output = egui::ScrollArea::vertical()
            .id_salt(self.id)
            .max_height(260.0)
            .show(ui, |ui| {
                egui::Grid::new((self.id, "rows"))
                    .num_columns(column_count)
                    .striped(true)
                    .min_col_width(120.0)
                    .show(ui, |ui| {
                        for col in self.model.columns() {
                            ui.label(egui::RichText::new(col.title()).strong());
                        }
                        ui.end_row();

                        for &row in &rows {
                            let is_selected = self.selected == Some(row);
                            for col in 0..column_count {
                                let text = self.model.cell_text(row, col);
                                let response = ui.selectable_label(is_selected, text);
                                if response.clicked() {
                                    clicked = Some((row, col));
                                }
                                if response.double_clicked() {
                                    clicked = Some((row, col));
                                    double_clicked = true;
                                }
                            }
                            ui.end_row();
                        }
                    });
            });

        if let Some((row, col)) = clicked {
            self.selected = Some(row);
            self.last_clicked_column = Some(col);
            self.set_search_column(col);
        }
        if double_clicked {
            self.begin_edit();
        }

        // Type-ahead applies while the pointer is over the table, no dialog
        // is open and no widget (like the filter box) holds keyboard focus.
        let focus_free = ui.memory(|m| m.focused().is_none());
        if self.is_idle() && focus_free && ui.rect_contains_pointer(output.inner_rect) {
            let events = ui.input(|i| i.events.clone());
            self.handle_search_input(&events, Instant::now());
        }
    }

    /// Render the item editor and conflict dialogs, advancing the state
    /// machine from their responses.
    pub fn show_dialogs(&mut self, ctx: &egui::Context) {
        match self.state {
            EditState::Idle => {}
            EditState::Editing(_) => match self.editor.show(ctx) {
                EditorResponse::Pending => {}
                EditorResponse::Commit(candidate) => self.commit_candidate(candidate),
                EditorResponse::Cancel => self.cancel_edit(),
            },
            EditState::Conflict { .. } => {
                let mut choice = None;
                egui::Window::new("Duplicate Entry")
                    .collapsible(false)
                    .resizable(false)
                    .order(egui::Order::Foreground)
                    .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                    .show(ctx, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label("An identical entry already exists.");
                            ui.add_space(12.0);
                            ui.horizontal(|ui| {
                                if ui.button("Edit again").clicked() {
                                    choice = Some(ConflictChoice::ReEdit);
                                }
                                if ui.button("Discard").clicked() {
                                    choice = Some(ConflictChoice::Discard);
                                }
                            });
                        });
                    });
                if let Some(choice) = choice {
                    self.resolve_conflict(choice);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_model::Column;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Headless ItemEditor stand-in; tests drive commits directly through
    /// `commit_candidate`, so `show` is never called.
    struct NullEditor;

    impl ItemEditor<String> for NullEditor {
        fn begin(&mut self, _preset: Option<&String>, _ctx: EditorContext) {}
        fn show(&mut self, _ctx: &egui::Context) -> EditorResponse<String> {
            EditorResponse::Pending
        }
    }

    #[derive(Default)]
    struct EventLog {
        added: Vec<String>,
        removed: Vec<String>,
        edited: Vec<(String, String)>,
        sets: usize,
    }

    struct Recorder(Rc<RefCell<EventLog>>);

    impl TableEditorListener<String> for Recorder {
        fn item_added(&mut self, item: &String) {
            self.0.borrow_mut().added.push(item.clone());
        }
        fn item_removed(&mut self, item: &String) {
            self.0.borrow_mut().removed.push(item.clone());
        }
        fn item_edited(&mut self, old: &String, new: &String) {
            self.0.borrow_mut().edited.push((old.clone(), new.clone()));
        }
        fn items_set(&mut self) {
            self.0.borrow_mut().sets += 1;
        }
    }

    fn manual_editor() -> TableEditor<String> {
        let model = ListTableModel::new(vec![Column::new("Value", |s: &String| s.clone())]);
        TableEditor::new("test", model, Box::new(NullEditor))
    }

    fn sorted_editor() -> TableEditor<String> {
        let model = ListTableModel::sorted(
            vec![Column::new("Value", |s: &String| s.clone())],
            |a, b| a.cmp(b),
        );
        TableEditor::new("test", model, Box::new(NullEditor))
    }

    fn add(editor: &mut TableEditor<String>, item: &str) {
        editor.begin_add(None);
        editor.commit_candidate(item.to_string());
    }

    #[test]
    fn set_then_get_round_trips_in_order() {
        let mut editor = manual_editor();
        let items = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        editor.set_data(items.clone());
        assert_eq!(editor.get_data(), items);
    }

    #[test]
    fn add_inserts_after_selection_and_selects() {
        let mut editor = manual_editor();
        editor.set_data(vec!["a".into(), "b".into()]);
        editor.select(Some(0));
        add(&mut editor, "x");
        assert_eq!(editor.get_data(), vec!["a", "x", "b"]);
        assert_eq!(editor.selected_row(), Some(1));
    }

    #[test]
    fn add_without_selection_inserts_at_top() {
        let mut editor = manual_editor();
        editor.set_data(vec!["a".into()]);
        add(&mut editor, "x");
        assert_eq!(editor.get_data(), vec!["x", "a"]);
        assert_eq!(editor.selected_row(), Some(0));
    }

    #[test]
    fn duplicate_add_discard_leaves_data_unchanged() {
        let mut editor = manual_editor();
        editor.set_data(vec!["a".into(), "b".into()]);
        let before = editor.get_data();

        editor.begin_add(None);
        editor.commit_candidate("a".to_string());
        // Conflict pending; resolving with Discard must be a no-op.
        editor.resolve_conflict(ConflictChoice::Discard);
        assert_eq!(editor.get_data(), before);
    }

    #[test]
    fn duplicate_add_reedit_then_commit_unique() {
        let mut editor = manual_editor();
        editor.set_data(vec!["a".into()]);

        editor.begin_add(None);
        editor.commit_candidate("a".to_string());
        editor.resolve_conflict(ConflictChoice::ReEdit);
        editor.commit_candidate("c".to_string());
        assert_eq!(editor.get_data(), vec!["c", "a"]);
    }

    #[test]
    fn edit_replaces_in_place_index_stable() {
        let mut editor = manual_editor();
        editor.set_data(vec!["a".into(), "b".into(), "c".into()]);
        editor.select(Some(1));
        editor.begin_edit();
        editor.commit_candidate("x".to_string());
        assert_eq!(editor.get_data(), vec!["a", "x", "c"]);
        assert_eq!(editor.selected_row(), Some(1));
    }

    #[test]
    fn edit_keeping_the_same_value_is_not_a_conflict() {
        let mut editor = manual_editor();
        editor.set_data(vec!["a".into(), "b".into()]);
        editor.select(Some(0));
        editor.begin_edit();
        editor.commit_candidate("a".to_string());
        assert_eq!(editor.get_data(), vec!["a", "b"]);
    }

    #[test]
    fn edit_colliding_with_another_row_conflicts() {
        let mut editor = manual_editor();
        editor.set_data(vec!["a".into(), "b".into()]);
        editor.select(Some(1));
        editor.begin_edit();
        editor.commit_candidate("a".to_string());
        editor.resolve_conflict(ConflictChoice::Discard);
        assert_eq!(editor.get_data(), vec!["a", "b"]);
    }

    #[test]
    fn remove_reselects_sensibly() {
        let mut editor = manual_editor();
        editor.set_data(vec!["a".into(), "b".into(), "c".into()]);

        editor.select(Some(1));
        editor.remove_selected();
        assert_eq!(editor.get_data(), vec!["a", "c"]);
        assert_eq!(editor.selected_row(), Some(1));

        editor.select(Some(1));
        editor.remove_selected();
        assert_eq!(editor.selected_row(), Some(0));

        editor.remove_selected();
        assert_eq!(editor.selected_row(), None);
    }

    #[test]
    fn moves_swap_adjacent_rows() {
        let mut editor = manual_editor();
        editor.set_data(vec!["a".into(), "b".into(), "c".into()]);
        editor.select(Some(2));
        editor.move_up();
        assert_eq!(editor.get_data(), vec!["a", "c", "b"]);
        assert_eq!(editor.selected_row(), Some(1));
        editor.move_down();
        assert_eq!(editor.get_data(), vec!["a", "b", "c"]);
        // At the bottom edge, move_down is a no-op.
        editor.move_down();
        assert_eq!(editor.get_data(), vec!["a", "b", "c"]);
    }

    #[test]
    fn filter_text_disables_mutations() {
        let mut editor = sorted_editor();
        editor.set_data(vec!["alpha".into(), "beta".into()]);
        editor.set_filter("al");
        assert!(!editor.can_mutate());
        assert_eq!(editor.visible_rows(), vec![0]);

        editor.begin_add(None);
        editor.commit_candidate("gamma".to_string());
        assert_eq!(editor.get_data(), vec!["alpha", "beta"]);

        editor.set_filter("");
        assert!(editor.can_mutate());
    }

    #[test]
    fn invalid_filter_is_inline_status_not_an_error() {
        let mut editor = sorted_editor();
        editor.set_data(vec!["alpha".into()]);
        editor.set_filter("[unclosed");
        // Still disables mutation (filter text present) but shows all rows.
        assert!(!editor.can_mutate());
        assert_eq!(editor.visible_rows(), vec![0]);
    }

    #[test]
    fn typeahead_selects_prefix_match() {
        let mut editor = manual_editor();
        editor.set_data(vec!["Alpha".into(), "Beta".into(), "Gamma".into()]);
        let now = Instant::now();
        editor.search_key('b', now);
        editor.search_key('e', now);
        assert_eq!(editor.selected_row(), Some(1));
    }

    fn two_column_editor() -> TableEditor<String> {
        let model = ListTableModel::new(vec![
            Column::new("Name", |s: &String| s.clone()),
            Column::new("Reversed", |s: &String| s.chars().rev().collect()),
        ]);
        TableEditor::new("test", model, Box::new(NullEditor))
    }

    #[test]
    fn retargeting_search_column_resets_the_buffer() {
        let mut editor = two_column_editor();
        editor.set_data(vec!["Alpha".into(), "Beta".into(), "Gamma".into()]);
        let now = Instant::now();
        editor.search_key('b', now);
        assert_eq!(editor.selected_row(), Some(1));

        // Fresh buffer against the second column's text ("ammaG" etc.); a
        // stale "b" prefix would match nothing.
        editor.set_search_column(1);
        editor.search_key('a', now);
        editor.search_key('m', now);
        editor.search_key('m', now);
        assert_eq!(editor.selected_row(), Some(2));

        // An out-of-range column is ignored; searching still targets the
        // second column.
        editor.set_search_column(5);
        editor.search_key('x', now);
        assert_eq!(editor.selected_row(), Some(2));
    }

    #[test]
    fn raw_input_events_drive_typeahead() {
        let mut editor = manual_editor();
        editor.set_data(vec!["Alpha".into(), "Beta".into(), "Gamma".into()]);
        let now = Instant::now();
        editor.handle_search_input(
            &[
                egui::Event::Text("ga".into()),
                egui::Event::Key {
                    key: egui::Key::Backspace,
                    physical_key: None,
                    pressed: true,
                    repeat: false,
                    modifiers: egui::Modifiers::default(),
                },
            ],
            now,
        );
        assert_eq!(editor.selected_row(), Some(2));

        // Backspace left "g" in the buffer, so "e" builds "ge": no match,
        // selection stays put.
        editor.handle_search_input(&[egui::Event::Text("e".into())], now);
        assert_eq!(editor.selected_row(), Some(2));
    }

    #[test]
    fn typeahead_no_match_keeps_selection() {
        let mut editor = manual_editor();
        editor.set_data(vec!["Alpha".into(), "Beta".into(), "Gamma".into()]);
        editor.select(Some(2));
        let now = Instant::now();
        editor.search_key('z', now);
        editor.search_key('z', now);
        assert_eq!(editor.selected_row(), Some(2));
    }

    #[test]
    fn no_duplicates_after_arbitrary_operations() {
        let mut editor = manual_editor();
        editor.set_data(vec!["a".into(), "b".into(), "c".into()]);

        add(&mut editor, "d");
        editor.begin_add(None);
        editor.commit_candidate("b".to_string());
        editor.resolve_conflict(ConflictChoice::Discard);
        editor.select(Some(0));
        editor.begin_edit();
        editor.commit_candidate("e".to_string());
        editor.move_down();
        editor.remove_selected();

        let data = editor.get_data();
        for (i, item) in data.iter().enumerate() {
            assert!(
                !data[i + 1..].contains(item),
                "duplicate {item:?} in {data:?}"
            );
        }
    }

    #[test]
    fn listeners_observe_lifecycle() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut editor = manual_editor();
        editor.add_listener(Box::new(Recorder(log.clone())));

        editor.set_data(vec!["a".into()]);
        add(&mut editor, "b");
        editor.select(Some(0));
        editor.begin_edit();
        editor.commit_candidate("c".to_string());
        editor.remove_selected();

        let log = log.borrow();
        assert_eq!(log.sets, 1);
        assert_eq!(log.added, vec!["b"]);
        assert_eq!(log.edited, vec![("b".to_string(), "c".to_string())]);
        assert_eq!(log.removed, vec!["c"]);
    }
}
