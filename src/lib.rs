// Copyright 2025 bakri (tidynest@proton.me)
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

//! Modal Keys
//!
//! Remaps custom keyboard shortcuts to navigation keys while a modal picker
//! or suggestion list of the host application is open. `Ctrl+KeyN` can move
//! down a list, `Ctrl+KeyP` up, and so on, without touching the arrow keys.
//!
//! # Features
//!
//! - **Shortcut Parsing:** `"Ctrl+Shift+KeyJ"` style strings, any modifier order
//! - **Strict Matching:** all four modifiers must match exactly
//! - **Multiple Shortcuts per Action:** next, previous, confirm, close
//! - **Context Detection:** remapping only while a target selector matches
//! - **Settings Migration:** single-shortcut records upgrade to lists on load
//! - **Atomic Saves:** settings are deduplicated and written atomically
//!
//! # Architecture
//!
//! - **`core`:** Business logic (types, parser, matcher, dispatch, linting)
//! - **`config`:** Settings record, migration, persistence
//! - **`context`:** Target context detection over a host document
//! - **`plugin`:** Owning context object wiring it together
//!
//! # Examples
//!
//! ## Parsing and matching a shortcut
//!
//! ```
//! use modal_keys::core::{matcher::matches_key_event, parser::parse_key_binding, KeyEvent, Modifiers};
//!
//! let binding = parse_key_binding("Ctrl+KeyN");
//! let event = KeyEvent::new("KeyN", Modifiers { ctrl: true, ..Modifiers::NONE });
//! assert!(matches_key_event(&event, binding.as_ref()));
//! ```
//!
//! ## Loading settings and handling a keypress
//!
//! ```no_run
//! use modal_keys::config::SettingsManager;
//! use modal_keys::context::ClassDocument;
//! use modal_keys::core::dispatch::RecordingHost;
//! use modal_keys::core::{KeyEvent, Modifiers};
//! use modal_keys::plugin::ModalKeys;
//!
//! let manager = SettingsManager::new("/tmp/modal-keys/data.json".into())?;
//! let plugin = ModalKeys::load(manager)?;
//!
//! let document = ClassDocument::with_classes(["modal-container"]);
//! let mut host = RecordingHost::default();
//! let event = KeyEvent::new("KeyP", Modifiers { ctrl: true, ..Modifiers::NONE });
//! println!("{:?}", plugin.on_key_down(&document, &mut host, &event));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod context;
pub mod core;
pub mod logging;
pub mod plugin;

// Re-export commonly used types for convenience
pub use crate::config::Settings;
pub use crate::core::{Action, KeyBinding, KeyEvent, Modifiers};
