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

//! Shortcut linting
//!
//! The parser is deliberately forgiving: `"KeyA+KeyB"` parses (as `KeyB`)
//! and `"Ctrl+Alt"` silently yields no binding. This module reports those
//! cases so `modal-keys check` can point at shortcuts that will never fire
//! or do not do what they look like.
//!
//! Validation never changes what the parser or matcher do.

use thiserror::Error;

use crate::core::parser::{parse_key_binding, parse_tokens, Token};

/// Validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Empty placeholder slot
    #[error("Shortcut is not set")]
    Empty,

    /// Only modifiers, nothing to match against
    #[error("Shortcut '{0}' has no key, only modifiers")]
    MissingKey(String),

    /// More than one key token; only the last is used
    #[error("Shortcut '{shortcut}' names several keys; only '{used}' is used")]
    DiscardedKeys { shortcut: String, used: String },

    /// Key token that can never equal a physical key code
    #[error("Invalid key code '{0}'")]
    UnknownToken(String),
}

impl ValidationError {
    /// Placeholders are expected in every list and not worth a warning
    pub fn is_informational(&self) -> bool {
        matches!(self, ValidationError::Empty)
    }
}

/// Validates key code format
///
/// Physical key codes are ASCII alphanumeric identifiers starting with a
/// letter: `KeyN`, `Digit1`, `F12`, `ArrowDown`, `BracketLeft`.
pub fn validate_key_code(code: &str) -> Result<(), ValidationError> {
    let mut chars = code.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric());

    if valid {
        Ok(())
    } else {
        Err(ValidationError::UnknownToken(code.to_string()))
    }
}

/// Validates one configured shortcut string
///
/// Checks, in order:
/// - Placeholder (empty or whitespace)
/// - At least one key token
/// - Key code format of every key token
/// - Exactly one key token
pub fn validate_shortcut(shortcut: &str) -> Result<(), ValidationError> {
    if shortcut.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    let keys: Vec<&str> = parse_tokens(shortcut)
        .into_iter()
        .filter_map(|token| match token {
            Token::Key(code) => Some(code),
            _ => None,
        })
        .collect();

    // A trailing empty token leaves no key even after a key token
    let Some(binding) = parse_key_binding(shortcut) else {
        return Err(ValidationError::MissingKey(shortcut.to_string()));
    };

    for key in &keys {
        validate_key_code(key)?;
    }

    if keys.len() > 1 {
        return Err(ValidationError::DiscardedKeys {
            shortcut: shortcut.to_string(),
            used: binding.key,
        });
    }

    Ok(())
}
