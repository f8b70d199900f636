//! Typed setting values.
//!
//! Every named setting holds exactly one of these kinds for its whole
//! lifetime; the store enforces the kind on reads and writes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single setting value.
///
/// Serialized untagged so the settings file stays a plain TOML table:
/// booleans, integers, strings, string arrays and string tables map directly
/// onto the variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer ("long" in the store contract).
    Long(i64),
    /// Free-form string.
    Str(String),
    /// Ordered list of strings.
    List(Vec<String>),
    /// String-to-string map.
    Map(BTreeMap<String, String>),
}

impl SettingValue {
    /// The kind tag for this value.
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::Long(_) => SettingKind::Long,
            SettingValue::Str(_) => SettingKind::Str,
            SettingValue::List(_) => SettingKind::List,
            SettingValue::Map(_) => SettingKind::Map,
        }
    }
}

/// The kind of value a named setting holds.
///
/// Fixed at definition time; a setting never changes kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Str,
    Long,
    Bool,
    List,
    Map,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettingKind::Str => "string",
            SettingKind::Long => "long",
            SettingKind::Bool => "boolean",
            SettingKind::List => "list",
            SettingKind::Map => "map",
        };
        write!(f, "{name}")
    }
}

/// Result of a store write: did the stored value actually change?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The write replaced a different value.
    Changed,
    /// The write was a no-op; the value was already equal.
    Unchanged,
}

impl SetOutcome {
    pub fn is_changed(self) -> bool {
        self == SetOutcome::Changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_reports_its_kind() {
        assert_eq!(SettingValue::Bool(true).kind(), SettingKind::Bool);
        assert_eq!(SettingValue::Long(5).kind(), SettingKind::Long);
        assert_eq!(SettingValue::Str("x".into()).kind(), SettingKind::Str);
        assert_eq!(SettingValue::List(vec![]).kind(), SettingKind::List);
        assert_eq!(
            SettingValue::Map(BTreeMap::new()).kind(),
            SettingKind::Map
        );
    }

    #[test]
    fn untagged_toml_round_trip() {
        let mut values = BTreeMap::new();
        values.insert("laf".to_string(), SettingValue::Str("dark".into()));
        values.insert("timeout_seconds".to_string(), SettingValue::Long(30));
        values.insert("membership_enabled".to_string(), SettingValue::Bool(true));
        values.insert(
            "ignored_users".to_string(),
            SettingValue::List(vec!["troll".into(), "spammer".into()]),
        );
        let mut sounds = BTreeMap::new();
        sounds.insert("mention".to_string(), "ping.wav".to_string());
        values.insert("event_sounds".to_string(), SettingValue::Map(sounds));

        let text = toml::to_string_pretty(&values).unwrap();
        let back: BTreeMap<String, SettingValue> = toml::from_str(&text).unwrap();
        assert_eq!(back, values);
    }
}
