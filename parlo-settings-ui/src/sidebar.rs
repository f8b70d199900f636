//! Settings window sidebar: one entry per tab.

/// Settings tab categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    General,
    Hotkeys,
    Usericons,
    Notifications,
    IgnoreList,
}

impl SettingsTab {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Hotkeys => "Hotkeys",
            Self::Usericons => "User Icons",
            Self::Notifications => "Notifications",
            Self::IgnoreList => "Ignore List",
        }
    }

    pub fn all() -> &'static [SettingsTab] {
        &[
            Self::General,
            Self::Hotkeys,
            Self::Usericons,
            Self::Notifications,
            Self::IgnoreList,
        ]
    }
}

/// Render the sidebar, returning the newly selected tab if it changed.
pub fn show_sidebar(ui: &mut egui::Ui, current: SettingsTab) -> Option<SettingsTab> {
    let mut selected = None;
    for tab in SettingsTab::all() {
        if ui
            .selectable_label(current == *tab, tab.display_name())
            .clicked()
            && current != *tab
        {
            selected = Some(*tab);
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tab_is_listed_once() {
        let all = SettingsTab::all();
        assert_eq!(all.len(), 5);
        for (i, tab) in all.iter().enumerate() {
            assert!(!all[i + 1..].contains(tab));
            assert!(!tab.display_name().is_empty());
        }
    }
}
