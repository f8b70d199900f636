//! Trait definitions for settings UI extension points.
//!
//! These traits define the interface between the generic collection
//! framework and the per-domain code that plugs into it: modal item editors,
//! change listeners, and commit-time value formatters.

/// Context handed to an [`ItemEditor`] when an edit attempt begins.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorContext {
    /// True when editing an existing row, false when adding a new one.
    pub editing: bool,
    /// The column the user interacted with to start the edit, if any.
    /// Editors may use it to focus the matching field.
    pub clicked_column: Option<usize>,
}

/// Outcome of one frame of a modal item editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorResponse<T> {
    /// The dialog is still open.
    Pending,
    /// The user confirmed with a candidate item.
    Commit(T),
    /// The user dismissed the dialog without confirming.
    Cancel,
}

/// A pluggable modal dialog producing one validated instance of a
/// collection's row type.
///
/// Implemented per domain (hotkeys, usericons, ...). The owning
/// [`TableEditor`](crate::TableEditor) calls [`begin`](ItemEditor::begin)
/// once per edit attempt and then [`show`](ItemEditor::show) every frame
/// until the response is no longer [`EditorResponse::Pending`]. While the
/// dialog is open the parent table routes all interaction here, so the
/// collection cannot be mutated out from under an open editor.
pub trait ItemEditor<T> {
    /// Open the dialog. `preset` pre-fills the form: the existing row in
    /// edit mode, or an optional template in add mode.
    fn begin(&mut self, preset: Option<&T>, ctx: EditorContext);

    /// Render the dialog for this frame and report its state.
    fn show(&mut self, ctx: &egui::Context) -> EditorResponse<T>;
}

/// Change notifications emitted by a [`TableEditor`](crate::TableEditor).
///
/// All methods default to no-ops so implementers subscribe only to what
/// they need.
pub trait TableEditorListener<T> {
    /// A new item was committed.
    fn item_added(&mut self, _item: &T) {}

    /// An item was removed.
    fn item_removed(&mut self, _item: &T) {}

    /// An item was replaced in place.
    fn item_edited(&mut self, _old: &T, _new: &T) {}

    /// The contents changed as a whole (bulk operation).
    fn all_items_changed(&mut self, _items: &[T]) {}

    /// `set_data` replaced the entire backing sequence.
    fn items_set(&mut self) {}

    /// The owner should re-render derived state.
    fn refresh_data(&mut self) {}
}

/// Commit-time normalization for a single value.
///
/// `None` (or a formatted result the caller treats as empty) rejects the
/// value silently: the entry is dropped, no error is raised.
pub trait DataFormatter<T> {
    fn format(&self, raw: T) -> Option<T>;
}

impl<T, F> DataFormatter<T> for F
where
    F: Fn(T) -> Option<T>,
{
    fn format(&self, raw: T) -> Option<T> {
        self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_formatters() {
        let trim = |s: String| {
            let t = s.trim().to_string();
            if t.is_empty() { None } else { Some(t) }
        };
        assert_eq!(trim.format("  hi  ".to_string()), Some("hi".to_string()));
        assert_eq!(trim.format("   ".to_string()), None);
    }
}
