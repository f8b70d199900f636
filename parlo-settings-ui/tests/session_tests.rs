//! End-to-end tests driving a settings session through its public API.

use std::time::Instant;

use parlo_config::{Hotkey, SettingsStore, Usericon};
use parlo_settings_ui::{ChangeSideEffect, ConflictChoice, SettingsSession};

fn session_at(path: &std::path::Path) -> SettingsSession {
    let mut store = SettingsStore::with_path(path);
    SettingsSession::define_settings(&mut store);
    store.load().expect("load settings");
    SettingsSession::with_store(store)
}

#[test]
fn membership_change_requires_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_at(&dir.path().join("settings.toml"));

    // The widget still shows the loaded value; once the store disagrees,
    // saving writes the widget value back and reports the change.
    session.store_mut().set_bool("membership_enabled", false);
    assert_eq!(session.save(), ChangeSideEffect::ReconnectRequired);
    assert_eq!(session.save(), ChangeSideEffect::None);
}

#[test]
fn restart_outranks_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_at(&dir.path().join("settings.toml"));

    session.store_mut().set_bool("membership_enabled", false);
    session.store_mut().set_string("laf", "dark");
    assert_eq!(session.save(), ChangeSideEffect::RestartRequired);
}

#[test]
fn hotkey_editing_journey_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    let mut session = session_at(&path);

    let hotkeys = session.hotkeys_mut();
    hotkeys.begin_add(None);
    hotkeys.commit_candidate(Hotkey::new("Ctrl+R", "reply"));
    hotkeys.begin_add(None);
    hotkeys.commit_candidate(Hotkey::new("Ctrl+Q", "quote"));

    // A second binding for an existing chord conflicts; discarding it
    // leaves the list alone.
    hotkeys.begin_add(None);
    hotkeys.commit_candidate(Hotkey::new("Ctrl+R", "open_channel"));
    hotkeys.resolve_conflict(ConflictChoice::Discard);

    // Order is user-controlled and survives the save.
    hotkeys.select(Some(1));
    hotkeys.move_up();
    session.save();

    let session = session_at(&path);
    let data: Vec<String> = session
        .store()
        .get_list("hotkeys")
        .iter()
        .filter_map(|e| Hotkey::parse_entry(e))
        .map(|h| h.action)
        .collect();
    assert_eq!(data, vec!["quote", "reply"]);
}

#[test]
fn usericons_stay_sorted_and_searchable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    let mut session = session_at(&path);

    let icons = session.usericons_mut();
    for (name, file) in [("zelda", "z.png"), ("Alice", "a.png"), ("bob", "b.png")] {
        icons.begin_add(None);
        icons.commit_candidate(Usericon::new(name, file));
    }
    let names: Vec<String> = icons.get_data().iter().map(|u| u.username.clone()).collect();
    assert_eq!(names, vec!["Alice", "bob", "zelda"]);

    // Type-ahead lands on bob, then removal reselects sensibly.
    let now = Instant::now();
    icons.search_key('b', now);
    icons.search_key('o', now);
    assert_eq!(icons.selected_row(), Some(1));
    icons.remove_selected();
    assert_eq!(icons.get_data().len(), 2);
    assert_eq!(icons.selected_row(), Some(1));

    session.save();
    let session = session_at(&path);
    assert_eq!(session.store().get_list("usericons").len(), 2);
}

#[test]
fn filtered_table_blocks_mutation_until_cleared() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_at(&dir.path().join("settings.toml"));

    let icons = session.usericons_mut();
    icons.begin_add(None);
    icons.commit_candidate(Usericon::new("alice", "a.png"));
    icons.set_filter("ali");
    assert!(!icons.can_mutate());
    icons.begin_add(None);
    icons.commit_candidate(Usericon::new("bob", "b.png"));
    assert_eq!(icons.get_data().len(), 1);

    icons.set_filter("");
    icons.begin_add(None);
    icons.commit_candidate(Usericon::new("bob", "b.png"));
    assert_eq!(icons.get_data().len(), 2);
}
