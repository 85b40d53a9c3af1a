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

//! src/core/mod.rs
//!
//! Core remapping logic
//!
//! This module contains the data structures and algorithms that decide
//! whether a keypress gets remapped, including:
//! - Type definitions for bindings, events and actions
//! - Shortcut string parsing and formatting
//! - Strict event matching
//! - The dispatch decision over a host trait
//! - Shortcut linting and cross-action conflict reporting
//!
//! Nothing here touches the filesystem or a real UI, so it is all unit
//! testable without a host application.

pub mod conflict;
pub mod dispatch;
pub mod matcher;
pub mod parser;
pub mod types;
pub mod validator;

pub use conflict::{Conflict, ConflictDetector};
pub use dispatch::{handle_key_event, resolve_action, DispatchOutcome, KeyboardHost};
pub use types::*;
pub use validator::{validate_shortcut, ValidationError};

#[cfg(test)]
mod tests;
