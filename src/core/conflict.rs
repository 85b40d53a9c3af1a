//! Cross-action shortcut conflict detection
//!
//! Dispatch walks actions in priority order and stops at the first match,
//! so a shortcut configured under two actions only ever fires the first
//! one. This module finds those shadowed shortcuts using a HashMap keyed by
//! the parsed binding, so `"ctrl+KeyN"` and `"Ctrl+KeyN"` collide.
//!
//! Detection is report-only; nothing here changes dispatch.

use std::collections::HashMap;

use crate::config::Settings;
use crate::core::parser::parse_key_binding;
use crate::core::types::{Action, KeyBinding};

/// Detects shortcuts bound to more than one action.
///
/// Maps each binding to every action listing it, in insertion order.
pub struct ConflictDetector {
    bindings: HashMap<KeyBinding, Vec<Action>>,
}

/// A binding configured under several actions.
#[derive(Clone, Debug, PartialEq)]
pub struct Conflict {
    /// The shared binding
    pub binding: KeyBinding,

    /// The action that fires (highest priority)
    pub winner: Action,

    /// Actions that can never fire for this binding
    pub shadowed: Vec<Action>,
}

impl ConflictDetector {
    /// Creates a new empty conflict detector.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Indexes every parsable shortcut of every action.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut detector = Self::new();
        for action in Action::ALL {
            for shortcut in settings.shortcuts(action) {
                detector.add_shortcut(action, shortcut);
            }
        }
        detector
    }

    /// Adds one shortcut. Unparsable shortcuts are ignored.
    pub fn add_shortcut(&mut self, action: Action, shortcut: &str) {
        let Some(binding) = parse_key_binding(shortcut) else {
            return;
        };

        let actions = self.bindings.entry(binding).or_default();
        if !actions.contains(&action) {
            actions.push(action);
        }
    }

    /// Finds all bindings shared by two or more actions.
    ///
    /// Sorted by winning action, then by canonical shortcut string, so
    /// output is stable across runs.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        let mut conflicts: Vec<Conflict> = self
            .bindings
            .iter()
            .filter(|(_, actions)| actions.len() > 1)
            .map(|(binding, actions)| {
                let mut actions = actions.clone();
                actions.sort();
                Conflict {
                    binding: binding.clone(),
                    winner: actions[0],
                    shadowed: actions[1..].to_vec(),
                }
            })
            .collect();

        conflicts.sort_by(|a, b| {
            a.winner
                .cmp(&b.winner)
                .then_with(|| a.binding.to_string().cmp(&b.binding.to_string()))
        });
        conflicts
    }

    /// Checks if a specific binding is shared between actions.
    pub fn has_conflict(&self, binding: &KeyBinding) -> bool {
        self.bindings
            .get(binding)
            .map(|actions| actions.len() > 1)
            .unwrap_or(false)
    }

    /// Returns the number of distinct bindings tracked.
    pub fn total_bindings(&self) -> usize {
        self.bindings.len()
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
