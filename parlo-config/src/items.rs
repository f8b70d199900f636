//! Chat-domain collection items edited in the settings UI.
//!
//! Equality on these types is deliberately the user-facing identity key: the
//! collection framework uses `==` both as "is this the same logical entry"
//! and as the duplicate-detection key, so the impls here define what counts
//! as a duplicate row.

use std::cmp::Ordering;

/// A hotkey binding: one key chord mapped to one chat action.
#[derive(Debug, Clone, Eq)]
pub struct Hotkey {
    /// Action identifier, e.g. `"reply"` or `"open_channel"`.
    pub action: String,
    /// Key chord, e.g. `"Ctrl+R"`.
    pub key: String,
}

/// Identity is the key chord: two rows binding the same chord are duplicates
/// even when they target different actions.
impl PartialEq for Hotkey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Hotkey {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            key: key.into(),
        }
    }

    /// Encode as a `key=action` list entry for List-kind storage.
    ///
    /// Chords containing `=` are not representable and rejected by the
    /// hotkey editor before they reach this point.
    pub fn to_entry(&self) -> String {
        format!("{}={}", self.key, self.action)
    }

    /// Parse a `key=action` list entry; `None` for malformed entries.
    pub fn parse_entry(entry: &str) -> Option<Self> {
        let (key, action) = entry.split_once('=')?;
        if key.is_empty() || action.is_empty() {
            return None;
        }
        Some(Self::new(key, action))
    }
}

/// A per-user icon override shown next to chat messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usericon {
    /// The chat username the icon applies to.
    pub username: String,
    /// Path to the image file on disk.
    pub image_path: String,
}

impl Usericon {
    pub fn new(username: impl Into<String>, image_path: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            image_path: image_path.into(),
        }
    }

    /// Sort key for the sorted usericon table.
    pub fn cmp_by_username(a: &Self, b: &Self) -> Ordering {
        a.username
            .to_lowercase()
            .cmp(&b.username.to_lowercase())
            .then_with(|| a.image_path.cmp(&b.image_path))
    }

    /// Encode as a `username=path` list entry for List-kind storage.
    pub fn to_entry(&self) -> String {
        format!("{}={}", self.username, self.image_path)
    }

    /// Parse a `username=path` list entry; `None` for malformed entries.
    pub fn parse_entry(entry: &str) -> Option<Self> {
        let (username, path) = entry.split_once('=')?;
        if username.is_empty() || path.is_empty() {
            return None;
        }
        Some(Self::new(username, path))
    }
}
