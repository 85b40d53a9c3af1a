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

//! Key event dispatch
//!
//! Decides, for one physical keypress, whether it should be remapped and
//! to what. The decision is a pure function of the settings snapshot and
//! the event ([`resolve_action`]); [`handle_key_event`] adds the side
//! effects through the [`KeyboardHost`] trait:
//!
//! 1. Bail out unless a target context is active
//! 2. Walk actions in priority order (next, previous, confirm, close)
//! 3. Within an action, walk its shortcuts in list order
//! 4. On the first match: suppress the original event, dispatch the
//!    semantic replacement key, and stop
//!
//! # Example
//! ```
//! use modal_keys::config::Settings;
//! use modal_keys::context::ClassDocument;
//! use modal_keys::core::dispatch::{handle_key_event, DispatchOutcome, RecordingHost};
//! use modal_keys::core::{Action, KeyEvent, Modifiers};
//!
//! let settings = Settings::default();
//! let document = ClassDocument::with_classes(["suggestion-container"]);
//! let mut host = RecordingHost::default();
//!
//! let event = KeyEvent::new("KeyN", Modifiers { ctrl: true, ..Modifiers::NONE });
//! let outcome = handle_key_event(&settings, &document, &mut host, &event);
//!
//! assert_eq!(outcome, DispatchOutcome::Remapped(Action::Next));
//! assert_eq!(host.dispatched[0].1.key, "ArrowDown");
//! ```

use tracing::{debug, trace};

use crate::config::Settings;
use crate::context::{is_context_active, Document};
use crate::core::matcher::matches_key_event;
use crate::core::parser::parse_key_binding;
use crate::core::types::{Action, KeyEvent};

/// Result of handling one key event
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchOutcome {
    /// Event left untouched
    Passed,
    /// Event suppressed and replaced by the action's semantic key
    Remapped(Action),
}

/// Where the synthesised event is sent
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchTarget {
    /// The currently focused element
    ActiveElement,
    /// Document-level fallback when nothing has focus
    Body,
}

/// Replacement keydown event
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyntheticKeyEvent {
    pub key: &'static str,
    pub code: &'static str,
}

impl SyntheticKeyEvent {
    pub fn for_action(action: Action) -> Self {
        Self {
            key: action.semantic_key(),
            code: action.semantic_key(),
        }
    }
}

/// Side effects the host performs on behalf of the dispatcher
pub trait KeyboardHost {
    /// True if some element currently has focus
    fn has_focus(&self) -> bool;

    /// Prevent the original event's default action and stop its propagation
    fn suppress(&mut self);

    /// Fire a synthesised keydown at `target`
    fn dispatch(&mut self, target: DispatchTarget, event: SyntheticKeyEvent);
}

/// Host that records calls instead of touching a UI
///
/// Used by the CLI simulator and by tests.
#[derive(Debug)]
pub struct RecordingHost {
    pub focused: bool,
    pub suppressed: usize,
    pub dispatched: Vec<(DispatchTarget, SyntheticKeyEvent)>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            focused: true,
            suppressed: 0,
            dispatched: Vec::new(),
        }
    }
}

impl KeyboardHost for RecordingHost {
    fn has_focus(&self) -> bool {
        self.focused
    }

    fn suppress(&mut self) {
        self.suppressed += 1;
    }

    fn dispatch(&mut self, target: DispatchTarget, event: SyntheticKeyEvent) {
        self.dispatched.push((target, event));
    }
}

/// Finds the action a keypress maps to, ignoring context
///
/// Shortcuts are parsed on every call; lists are short and bindings are
/// never cached.
pub fn resolve_action(settings: &Settings, event: &KeyEvent) -> Option<Action> {
    Action::ALL.into_iter().find(|&action| {
        settings.shortcuts(action).iter().any(|shortcut| {
            let binding = parse_key_binding(shortcut);
            let hit = matches_key_event(event, binding.as_ref());
            if hit {
                trace!(%action, shortcut = shortcut.as_str(), "shortcut matched");
            }
            hit
        })
    })
}

/// Handles one keydown from the host
///
/// At most one action fires per event. When nothing matches, or no target
/// context is active, the host is not touched at all.
pub fn handle_key_event(
    settings: &Settings,
    document: &dyn Document,
    host: &mut dyn KeyboardHost,
    event: &KeyEvent,
) -> DispatchOutcome {
    if !is_context_active(settings, document) {
        return DispatchOutcome::Passed;
    }

    let Some(action) = resolve_action(settings, event) else {
        return DispatchOutcome::Passed;
    };

    host.suppress();

    let target = if host.has_focus() {
        DispatchTarget::ActiveElement
    } else {
        DispatchTarget::Body
    };
    host.dispatch(target, SyntheticKeyEvent::for_action(action));

    debug!(
        code = event.code.as_str(),
        %action,
        key = action.semantic_key(),
        "remapped key event"
    );

    DispatchOutcome::Remapped(action)
}
