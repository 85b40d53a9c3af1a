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

//! Target context detection
//!
//! Remapping is only active while one of the configured selectors matches
//! something in the host document, typically a suggestion popover or a modal
//! container. The host provides the document through the [`Document`] trait;
//! [`ClassDocument`] is an in-memory stand-in used by the CLI simulator and
//! by tests.
//!
//! # Example
//! ```
//! use modal_keys::config::Settings;
//! use modal_keys::context::{is_context_active, ClassDocument};
//!
//! let settings = Settings::default();
//! let document = ClassDocument::with_classes(["modal-container"]);
//! assert!(is_context_active(&settings, &document));
//! ```

use thiserror::Error;
use tracing::warn;

use crate::config::Settings;

pub mod document;

pub use document::ClassDocument;

/// Selector evaluation failures
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SelectorError {
    /// Not a valid CSS selector
    #[error("Invalid selector '{0}'")]
    Syntax(String),

    /// Valid CSS, but the document cannot evaluate it
    #[error("Unsupported selector '{0}'")]
    Unsupported(String),
}

/// The host document, as far as context detection needs it
pub trait Document {
    /// True if at least one element matches `selector`
    fn query_selector(&self, selector: &str) -> Result<bool, SelectorError>;
}

/// Splits `targetClasses` into selectors
///
/// One selector per line, trimmed, blank lines dropped.
pub fn target_selectors(settings: &Settings) -> Vec<&str> {
    settings
        .target_classes
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// True if any target selector matches the document
///
/// A selector the document rejects is logged and counts as no match; the
/// remaining selectors are still checked.
pub fn is_context_active(settings: &Settings, document: &dyn Document) -> bool {
    target_selectors(settings)
        .into_iter()
        .any(|selector| match document.query_selector(selector) {
            Ok(found) => found,
            Err(e) => {
                warn!(selector, error = %e, "skipping target selector");
                false
            }
        })
}
