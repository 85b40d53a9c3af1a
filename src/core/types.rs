// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/types.rs
//!
//! Core type definitions for shortcut remapping
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Modifiers`: The four modifier flags (Ctrl, Alt, Shift, Meta)
//! - `KeyBinding`: A parsed shortcut, modifiers plus a physical key code
//! - `KeyEvent`: The crate's view of a host keyboard event
//! - `Action`: The four navigation actions a shortcut can trigger

use serde::{Deserialize, Serialize};
use std::fmt;

/// Modifier key state
///
/// Bindings compare all four flags exactly, so a binding without `shift`
/// never matches an event with Shift held.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Canonical modifier names of the active flags, in Ctrl, Alt, Shift, Meta order
    pub fn names(&self) -> Vec<&'static str> {
        [
            (self.ctrl, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
            (self.meta, "Meta"),
        ]
        .into_iter()
        .filter_map(|(active, name)| active.then_some(name))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// A parsed shortcut
///
/// Produced on demand from a shortcut string such as `"Ctrl+KeyN"` and never
/// persisted. The key is a physical key code (`KeyboardEvent.code` in the
/// host), compared case-sensitively.
///
/// # Example
/// ```
/// use modal_keys::core::{KeyBinding, Modifiers};
///
/// let binding = KeyBinding::new(Modifiers { ctrl: true, ..Modifiers::NONE }, "KeyN");
/// assert_eq!(binding.to_string(), "Ctrl+KeyN");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct KeyBinding {
    /// Modifier flags that must match exactly
    pub modifiers: Modifiers,

    /// Physical key code (e.g., "KeyN", "ArrowDown", "Escape"). Never empty.
    pub key: String,
}

impl KeyBinding {
    pub fn new(modifiers: Modifiers, key: &str) -> Self {
        Self {
            modifiers,
            key: key.to_string(),
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in self.modifiers.names() {
            write!(f, "{}+", name)?;
        }
        write!(f, "{}", self.key)
    }
}

/// A keyboard event as delivered by the host
///
/// Mirrors the fields of a DOM `KeyboardEvent` that remapping looks at:
/// `key` is the logical key value ("Control", "n"), `code` is the physical
/// key code ("ControlLeft", "KeyN").
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: String,
    pub code: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Builds an event from a physical code, using the code as the logical key too
    pub fn new(code: &str, modifiers: Modifiers) -> Self {
        Self {
            key: code.to_string(),
            code: code.to_string(),
            modifiers,
        }
    }

    /// Overrides the logical key value
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }
}

/// Navigation actions a remapped shortcut can trigger
///
/// The declaration order is the dispatch priority: when the same shortcut is
/// configured for several actions, the earliest action wins.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Move selection down
    Next,
    /// Move selection up
    Previous,
    /// Accept the selected item
    Confirm,
    /// Dismiss the picker
    Close,
}

impl Action {
    /// All actions in dispatch priority order
    pub const ALL: [Action; 4] = [Action::Next, Action::Previous, Action::Confirm, Action::Close];

    /// The navigation key synthesised when this action fires
    pub fn semantic_key(self) -> &'static str {
        match self {
            Action::Next => "ArrowDown",
            Action::Previous => "ArrowUp",
            Action::Confirm => "Enter",
            Action::Close => "Escape",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Next => write!(f, "next"),
            Action::Previous => write!(f, "previous"),
            Action::Confirm => write!(f, "confirm"),
            Action::Close => write!(f, "close"),
        }
    }
}

impl std::str::FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "next" | "down" => Ok(Action::Next),
            "previous" | "prev" | "up" => Ok(Action::Previous),
            "confirm" | "enter" => Ok(Action::Confirm),
            "close" | "escape" => Ok(Action::Close),
            other => Err(format!(
                "unknown action '{}' (expected next, previous, confirm or close)",
                other
            )),
        }
    }
}
