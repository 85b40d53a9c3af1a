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

//! src/core/parser.rs
//!
//! Shortcut string parser
//!
//! Turns human-readable shortcuts like `"Ctrl+KeyN"` or `"Alt+Shift+KeyJ"`
//! into a [`KeyBinding`]. It handles:
//! - Case-insensitive modifier names and their aliases (Control, Cmd, Command)
//! - Modifiers in any order
//! - Whitespace around tokens
//!
//! # Architecture
//! Parsing happens in two steps:
//! 1. Tokenise: nom splits the input on `+` into trimmed tokens
//! 2. Classify: each token becomes a modifier, a key code, or nothing
//!
//! Parsing never fails loudly. Anything that does not yield a key code is
//! "no binding" and simply never matches.

use nom::{
    bytes::complete::take_till,
    character::complete::char,
    multi::separated_list1,
    IResult, Parser,
};

use crate::core::types::{KeyBinding, Modifiers};

/// Modifier named by a shortcut token
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModifierToken {
    Ctrl,
    Alt,
    Shift,
    Meta,
}

/// A classified shortcut token
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token<'a> {
    /// A modifier name (`Ctrl`, `Control`, `Alt`, `Shift`, `Meta`, `Cmd`, `Command`)
    Modifier(ModifierToken),
    /// Anything else, taken as a physical key code
    Key(&'a str),
    /// Nothing between two separators (e.g. the tail of `"Ctrl+"`)
    Empty,
}

/// Parse a shortcut string into a binding
///
/// Returns `None` for empty input and for input that names no key. When
/// several non-modifier tokens appear, the last one is the key and the
/// others are dropped. An empty token counts as a key that names nothing,
/// so `"Ctrl++KeyN"` binds `KeyN` while `"Ctrl+KeyN+"` binds nothing.
///
/// # Example
/// ```
/// use modal_keys::core::parser::parse_key_binding;
///
/// let binding = parse_key_binding("shift + ctrl + KeyJ").unwrap();
/// assert!(binding.modifiers.ctrl && binding.modifiers.shift);
/// assert_eq!(binding.key, "KeyJ");
///
/// assert!(parse_key_binding("Ctrl+Alt").is_none());
/// ```
pub fn parse_key_binding(input: &str) -> Option<KeyBinding> {
    if input.trim().is_empty() {
        return None;
    }

    let mut modifiers = Modifiers::NONE;
    let mut key = None;

    for token in parse_tokens(input) {
        match token {
            Token::Modifier(ModifierToken::Ctrl) => modifiers.ctrl = true,
            Token::Modifier(ModifierToken::Alt) => modifiers.alt = true,
            Token::Modifier(ModifierToken::Shift) => modifiers.shift = true,
            Token::Modifier(ModifierToken::Meta) => modifiers.meta = true,
            // Last non-modifier token is the key, and an empty one is no key
            Token::Key(code) => key = Some(code),
            Token::Empty => key = None,
        }
    }

    key.map(|code| KeyBinding::new(modifiers, code))
}

/// Split a shortcut into classified tokens
///
/// Exposed so the validator can see tokens the parser discards.
pub fn parse_tokens(input: &str) -> Vec<Token<'_>> {
    match split_tokens(input) {
        Ok((_, raw)) => raw.into_iter().map(|part| classify_token(part.trim())).collect(),
        Err(_) => Vec::new(),
    }
}

/// Tokenise on `+`
///
/// Always consumes the whole input: every byte is either a separator or
/// part of a token.
pub fn split_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('+'), take_till(|c: char| c == '+')).parse(input)
}

/// Classify one trimmed token
pub fn classify_token(token: &str) -> Token<'_> {
    if token.is_empty() {
        return Token::Empty;
    }

    match token.to_lowercase().as_str() {
        "ctrl" | "control" => Token::Modifier(ModifierToken::Ctrl),
        "alt" => Token::Modifier(ModifierToken::Alt),
        "shift" => Token::Modifier(ModifierToken::Shift),
        "meta" | "cmd" | "command" => Token::Modifier(ModifierToken::Meta),
        _ => Token::Key(token),
    }
}
