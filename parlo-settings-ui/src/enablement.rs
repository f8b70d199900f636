//! Declarative enable/disable dependencies between settings.
//!
//! A rule says: while the boolean control `when` shows `is`, the `targets`
//! are disabled. Rules react to the on-screen value, not the stored one, so
//! toggling a checkbox greys its dependents immediately.

use std::collections::BTreeSet;

/// One enablement dependency.
pub struct EnablementRule {
    pub when: &'static str,
    pub is: bool,
    pub targets: Vec<&'static str>,
}

impl EnablementRule {
    /// Disable `targets` while `when` is unchecked.
    pub fn requires(when: &'static str, targets: Vec<&'static str>) -> Self {
        Self {
            when,
            is: false,
            targets,
        }
    }
}

/// Names currently disabled under `rules`, given a lookup for on-screen
/// boolean values. Controls the lookup cannot resolve leave their rules
/// inactive.
pub fn disabled_settings(
    rules: &[EnablementRule],
    lookup: impl Fn(&str) -> Option<bool>,
) -> BTreeSet<&'static str> {
    let mut disabled = BTreeSet::new();
    for rule in rules {
        if lookup(rule.when) == Some(rule.is) {
            disabled.extend(rule.targets.iter().copied());
        }
    }
    disabled
}
