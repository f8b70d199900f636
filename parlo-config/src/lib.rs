//! Settings store for the Parlo chat client.
//!
//! This crate owns the persistent key/value settings model that the settings
//! UI reads and writes. It knows nothing about widgets: consumers get typed
//! values by name, write typed values back, and are told whether each write
//! actually changed anything.

mod error;
mod items;
mod store;
mod value;

pub use error::ConfigError;
pub use items::{Hotkey, Usericon};
pub use store::SettingsStore;
pub use value::{SetOutcome, SettingKind, SettingValue};
