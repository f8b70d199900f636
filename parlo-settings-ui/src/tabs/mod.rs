//! Per-tab settings panels.

pub mod general_tab;
pub mod hotkeys_tab;
pub mod ignore_tab;
pub mod notifications_tab;
pub mod usericons_tab;
