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

use crate::core::validator::{validate_key_code, validate_shortcut, ValidationError};

#[test]
fn test_valid_shortcuts() {
    assert!(validate_shortcut("Ctrl+KeyN").is_ok());
    assert!(validate_shortcut("Escape").is_ok());
    assert!(validate_shortcut("Alt+Shift+ArrowDown").is_ok());
    assert!(validate_shortcut("cmd+Digit1").is_ok());
    assert!(validate_shortcut("F12").is_ok());
}

#[test]
fn test_empty_is_informational() {
    assert_eq!(validate_shortcut(""), Err(ValidationError::Empty));
    assert_eq!(validate_shortcut("  "), Err(ValidationError::Empty));
    assert!(ValidationError::Empty.is_informational());
}

#[test]
fn test_missing_key() {
    assert_eq!(
        validate_shortcut("Ctrl+Alt"),
        Err(ValidationError::MissingKey("Ctrl+Alt".to_string()))
    );
    assert!(!ValidationError::MissingKey(String::new()).is_informational());
}

#[test]
fn test_trailing_separator_is_missing_key() {
    assert_eq!(
        validate_shortcut("Ctrl+KeyN+"),
        Err(ValidationError::MissingKey("Ctrl+KeyN+".to_string()))
    );
    assert!(validate_shortcut("Ctrl++KeyN").is_ok());
}

#[test]
fn test_discarded_keys() {
    assert_eq!(
        validate_shortcut("KeyA+KeyB"),
        Err(ValidationError::DiscardedKeys {
            shortcut: "KeyA+KeyB".to_string(),
            used: "KeyB".to_string(),
        })
    );
}

#[test]
fn test_invalid_key_codes() {
    assert!(validate_key_code("KeyN").is_ok());
    assert!(validate_key_code("Key N").is_err());
    assert!(validate_key_code("1Key").is_err());
    assert!(validate_key_code("Key-N").is_err());
    assert!(validate_key_code("").is_err());

    assert!(matches!(
        validate_shortcut("Ctrl+Key N"),
        Err(ValidationError::UnknownToken(_))
    ));
}

#[test]
fn test_bad_token_reported_before_discarded_keys() {
    assert_eq!(
        validate_shortcut("Key;A+KeyB"),
        Err(ValidationError::UnknownToken("Key;A".to_string()))
    );
}
