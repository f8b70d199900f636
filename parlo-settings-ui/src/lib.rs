//! Settings UI for the Parlo chat client.
//!
//! Two layers:
//!
//! - a settings registry ([`SettingRegistry`]) binding named settings from
//!   [`parlo_config::SettingsStore`] to egui controls, with save-time
//!   classification of what a change requires (nothing, a server reconnect,
//!   or a client restart), and
//! - a generic collection-editing framework ([`TableEditor`],
//!   [`ListTableModel`], [`ListSelector`]) for the list-shaped settings:
//!   hotkeys, user icons, the ignore list.
//!
//! The embedding app owns a [`SettingsSession`] per open settings window
//! and calls [`SettingsSession::show`] each frame.

pub mod controls;
pub mod enablement;
pub mod list_selector;
pub mod registry;
pub mod search;
pub mod session;
pub mod sidebar;
pub mod table_editor;
pub mod table_model;
pub mod tabs;
pub mod traits;

pub use controls::{BoolControl, ChoiceControl, ListControl, LongControl, MapControl, StringControl};
pub use enablement::{EnablementRule, disabled_settings};
pub use list_selector::{EntryMode, ListSelector};
pub use registry::{ChangeSideEffect, SaveOutcome, SaveReport, SettingControl, SettingRegistry};
pub use search::{SEARCH_RESET_AFTER, SearchBuffer, select_match};
pub use session::{SessionAction, SettingsSession};
pub use sidebar::SettingsTab;
pub use table_editor::{ConflictChoice, TableEditor};
pub use table_model::{Column, ListTableModel, RowOrder};
pub use traits::{DataFormatter, EditorContext, EditorResponse, ItemEditor, TableEditorListener};
