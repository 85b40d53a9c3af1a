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

//! src/core/matcher.rs
//!
//! Matching bindings against live key events, and formatting events back
//! into shortcut strings.
//!
//! Matching is strict: all four modifier flags must be equal, not just
//! "at least these". `Ctrl+Shift+KeyN` pressed by the user does not match a
//! `Ctrl+KeyN` binding.

use crate::core::types::{KeyBinding, KeyEvent};

/// Logical key values of the modifier keys themselves
const MODIFIER_KEYS: &[&str] = &["Control", "Alt", "Shift", "Meta"];

/// Checks whether an event matches a binding
///
/// An absent binding (unparsable shortcut) never matches.
pub fn matches_key_event(event: &KeyEvent, binding: Option<&KeyBinding>) -> bool {
    let Some(binding) = binding else {
        return false;
    };

    event.modifiers == binding.modifiers && event.code == binding.key
}

/// Formats an event as a canonical shortcut string
///
/// Modifiers come first in Ctrl, Alt, Shift, Meta order, then the physical
/// key code. An event without a code yields just the modifiers.
///
/// # Example
/// ```
/// use modal_keys::core::{matcher::format_key_event, KeyEvent, Modifiers};
///
/// let event = KeyEvent::new("KeyJ", Modifiers { ctrl: true, shift: true, ..Modifiers::NONE });
/// assert_eq!(format_key_event(&event), "Ctrl+Shift+KeyJ");
/// ```
pub fn format_key_event(event: &KeyEvent) -> String {
    let mut parts: Vec<&str> = event.modifiers.names();

    if !event.code.is_empty() {
        parts.push(&event.code);
    }

    parts.join("+")
}

/// True when the event is a bare modifier press (Ctrl, Alt, Shift or Meta on its own)
///
/// Shortcut recording waits for the next non-modifier key instead of
/// capturing these.
pub fn is_modifier_only(event: &KeyEvent) -> bool {
    MODIFIER_KEYS.contains(&event.key.as_str())
}
