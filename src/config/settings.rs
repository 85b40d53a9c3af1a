//! Settings record, defaults, migration and list hygiene.
//!
//! Two shapes live here:
//!
//! - [`StoredSettings`]: whatever is on disk. Every field is optional so that
//!   partial records and records from the single-shortcut schema
//!   (`nextKey`, `previousKey`, `closeKey`) deserialize cleanly.
//! - [`Settings`]: the canonical in-memory record. Four shortcut lists,
//!   each non-empty, plus the target selector text.
//!
//! [`migrate_settings`] turns the first into the second exactly once at load
//! time. [`cleanup_shortcut_lists`] runs before every save.
//!
//! # Example
//!
//! ```
//! use modal_keys::config::settings::{migrate_settings, StoredSettings};
//!
//! let stored: StoredSettings = serde_json::from_str(r#"{ "closeKey": "Escape" }"#)?;
//! let settings = migrate_settings(stored);
//! assert_eq!(settings.close_keys, vec!["Escape".to_string()]);
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::matcher::{format_key_event, is_modifier_only};
use crate::core::types::{Action, KeyEvent};

/// Default "next" shortcut
pub const DEFAULT_NEXT_KEY: &str = "Ctrl+KeyN";
/// Default "previous" shortcut
pub const DEFAULT_PREVIOUS_KEY: &str = "Ctrl+KeyP";
/// Default "close" shortcut
pub const DEFAULT_CLOSE_KEY: &str = "Escape";
/// Selectors of the host's suggestion popover and modal container
pub const DEFAULT_TARGET_CLASSES: &str = ".suggestion-container\n.modal-container";

/// Canonical settings record
///
/// Serialises to the persisted JSON shape. Legacy single-shortcut fields are
/// never written.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub next_keys: Vec<String>,
    pub previous_keys: Vec<String>,
    pub confirm_keys: Vec<String>,
    pub close_keys: Vec<String>,

    /// Newline-separated CSS selectors
    pub target_classes: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            next_keys: vec![DEFAULT_NEXT_KEY.to_string()],
            previous_keys: vec![DEFAULT_PREVIOUS_KEY.to_string()],
            // Confirm has no default shortcut, only the placeholder slot
            confirm_keys: vec![String::new()],
            close_keys: vec![DEFAULT_CLOSE_KEY.to_string()],
            target_classes: DEFAULT_TARGET_CLASSES.to_string(),
        }
    }
}

/// Settings as read from disk
///
/// Unknown fields are ignored. `next_key`, `previous_key` and `close_key`
/// are the pre-list schema and only feed [`migrate_settings`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_classes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_key: Option<String>,
}

impl StoredSettings {
    /// True if loading this record changes its on-disk shape
    ///
    /// That is the case when a legacy field is still present or when any
    /// canonical field is missing.
    pub fn needs_migration(&self) -> bool {
        let has_legacy =
            self.next_key.is_some() || self.previous_key.is_some() || self.close_key.is_some();
        let missing_field = self.next_keys.is_none()
            || self.previous_keys.is_none()
            || self.confirm_keys.is_none()
            || self.close_keys.is_none()
            || self.target_classes.is_none();

        has_legacy || missing_field
    }
}

impl From<Settings> for StoredSettings {
    fn from(settings: Settings) -> Self {
        Self {
            next_keys: Some(settings.next_keys),
            previous_keys: Some(settings.previous_keys),
            confirm_keys: Some(settings.confirm_keys),
            close_keys: Some(settings.close_keys),
            target_classes: Some(settings.target_classes),
            ..Self::default()
        }
    }
}

/// Upgrade a stored record into canonical settings
///
/// For next, previous and close: a non-empty list wins, then a non-empty
/// legacy string wrapped in a list, then the default. Confirm and the
/// target selectors just default when absent. Running it on an already
/// migrated record is a no-op.
pub fn migrate_settings(stored: StoredSettings) -> Settings {
    let defaults = Settings::default();

    Settings {
        next_keys: migrate_list(stored.next_keys, stored.next_key, defaults.next_keys),
        previous_keys: migrate_list(
            stored.previous_keys,
            stored.previous_key,
            defaults.previous_keys,
        ),
        confirm_keys: stored.confirm_keys.unwrap_or(defaults.confirm_keys),
        close_keys: migrate_list(stored.close_keys, stored.close_key, defaults.close_keys),
        target_classes: stored.target_classes.unwrap_or(defaults.target_classes),
    }
}

fn migrate_list(
    list: Option<Vec<String>>,
    legacy: Option<String>,
    default: Vec<String>,
) -> Vec<String> {
    match (list, legacy) {
        (Some(list), _) if !list.is_empty() => list,
        (_, Some(legacy)) if !legacy.is_empty() => vec![legacy],
        _ => default,
    }
}

/// Deduplicate every shortcut list in place
///
/// Runs before every save. See [`cleanup_shortcut_list`].
pub fn cleanup_shortcut_lists(settings: &mut Settings) {
    for action in Action::ALL {
        cleanup_shortcut_list(settings.shortcuts_mut(action));
    }
}

/// Deduplicate one shortcut list in place
///
/// Keeps order. The first empty slot survives, later ones are dropped.
/// Non-empty entries are compared trimmed and only the first occurrence is
/// kept. The result always has at least one entry.
pub fn cleanup_shortcut_list(list: &mut Vec<String>) {
    let mut seen = HashSet::new();
    let mut has_empty = false;

    list.retain(|entry| {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            !std::mem::replace(&mut has_empty, true)
        } else {
            seen.insert(trimmed.to_string())
        }
    });

    if list.is_empty() {
        list.push(String::new());
    }
}

impl Settings {
    /// Shortcut list for an action
    pub fn shortcuts(&self, action: Action) -> &[String] {
        match action {
            Action::Next => &self.next_keys,
            Action::Previous => &self.previous_keys,
            Action::Confirm => &self.confirm_keys,
            Action::Close => &self.close_keys,
        }
    }

    pub fn shortcuts_mut(&mut self, action: Action) -> &mut Vec<String> {
        match action {
            Action::Next => &mut self.next_keys,
            Action::Previous => &mut self.previous_keys,
            Action::Confirm => &mut self.confirm_keys,
            Action::Close => &mut self.close_keys,
        }
    }

    /// Replaces one slot. Returns false if `index` is out of range.
    pub fn set_shortcut(&mut self, action: Action, index: usize, value: &str) -> bool {
        match self.shortcuts_mut(action).get_mut(index) {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Stores a captured keypress in a slot
    ///
    /// Bare modifier presses are ignored so the user can hold Ctrl before
    /// pressing the key. Returns the stored shortcut string.
    pub fn record_shortcut(&mut self, action: Action, index: usize, event: &KeyEvent) -> Option<String> {
        if is_modifier_only(event) {
            return None;
        }

        let formatted = format_key_event(event);
        self.set_shortcut(action, index, &formatted)
            .then_some(formatted)
    }

    /// Empties one slot, leaving the placeholder behind
    pub fn clear_shortcut(&mut self, action: Action, index: usize) -> bool {
        self.set_shortcut(action, index, "")
    }

    /// Appends an empty slot unless the list already has one
    pub fn add_slot(&mut self, action: Action) -> bool {
        let list = self.shortcuts_mut(action);
        if list.iter().any(|entry| entry.trim().is_empty()) {
            return false;
        }
        list.push(String::new());
        true
    }

    /// Removes one slot
    ///
    /// Removing the last slot leaves the placeholder behind.
    pub fn remove_shortcut(&mut self, action: Action, index: usize) -> Option<String> {
        let list = self.shortcuts_mut(action);
        if index >= list.len() {
            return None;
        }

        let removed = list.remove(index);
        if list.is_empty() {
            list.push(String::new());
        }
        Some(removed)
    }

    pub fn set_target_classes(&mut self, text: &str) {
        self.target_classes = text.to_string();
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
