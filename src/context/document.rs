//! In-memory document for simulating target contexts
//!
//! Holds the set of class names and ids currently "on screen" and evaluates
//! the simple selectors target lists actually use:
//!
//! - `.a` and compound `.a.b`
//! - `#id`, optionally with classes (`#id.a`)
//! - `*`
//! - comma-separated lists of the above (`.a, .b`)
//!
//! Combinators, attribute selectors and pseudo-classes are valid CSS but
//! report [`SelectorError::Unsupported`].

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::{Document, SelectorError};

/// One compound selector: optional `#id` then any number of `.class`
#[allow(clippy::expect_used)]
static SIMPLE_SELECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#(?P<id>-?[_a-zA-Z][\w-]*))?(?P<classes>(?:\.-?[_a-zA-Z][\w-]*)*)$")
        .expect("simple selector pattern should be valid regex")
});

/// Characters that can appear in a CSS selector at all
#[allow(clippy::expect_used)]
static SELECTOR_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[\w\s.#*\[\]=~|^$"':>+(),-]+$"#)
        .expect("selector charset pattern should be valid regex")
});

/// Set of classes and ids standing in for a live DOM
#[derive(Clone, Debug, Default)]
pub struct ClassDocument {
    classes: HashSet<String>,
    ids: HashSet<String>,
}

impl ClassDocument {
    /// An empty document: no selector except `*` on a non-empty page matches
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut document = Self::new();
        for class in classes {
            document.add_class(class);
        }
        document
    }

    /// Adds a class. A leading `.` is accepted and stripped.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        let class = class.trim().trim_start_matches('.');
        if !class.is_empty() {
            self.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class.trim_start_matches('.'));
    }

    pub fn add_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        let id = id.trim().trim_start_matches('#');
        if !id.is_empty() {
            self.ids.insert(id.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.ids.is_empty()
    }

    /// Evaluates one compound selector (no commas)
    ///
    /// Classes and ids are tracked independently, so `#a.b` matches when both
    /// are present anywhere, not necessarily on the same element.
    fn matches_compound(&self, selector: &str) -> Result<bool, SelectorError> {
        if selector == "*" {
            return Ok(!self.is_empty());
        }

        if let Some(caps) = SIMPLE_SELECTOR.captures(selector) {
            let id_ok = caps
                .name("id")
                .is_none_or(|id| self.ids.contains(id.as_str()));
            let classes_ok = caps
                .name("classes")
                .map(|m| m.as_str())
                .unwrap_or_default()
                .split('.')
                .filter(|class| !class.is_empty())
                .all(|class| self.classes.contains(class));
            return Ok(id_ok && classes_ok);
        }

        if looks_like_css(selector) {
            Err(SelectorError::Unsupported(selector.to_string()))
        } else {
            Err(SelectorError::Syntax(selector.to_string()))
        }
    }
}

impl Document for ClassDocument {
    fn query_selector(&self, selector: &str) -> Result<bool, SelectorError> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(SelectorError::Syntax(selector.to_string()));
        }

        let mut found = false;
        for part in selector.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(SelectorError::Syntax(selector.to_string()));
            }
            // Keep validating the rest of the list even after a hit
            found |= self.matches_compound(part)?;
        }
        Ok(found)
    }
}

/// Rough syntax check for selectors the simple matcher does not handle
///
/// Rejects foreign characters, unbalanced brackets and a dangling `.` or `#`.
fn looks_like_css(selector: &str) -> bool {
    if !SELECTOR_CHARS.is_match(selector) {
        return false;
    }

    let mut depth_square = 0i32;
    let mut depth_round = 0i32;
    for c in selector.chars() {
        match c {
            '[' => depth_square += 1,
            ']' => depth_square -= 1,
            '(' => depth_round += 1,
            ')' => depth_round -= 1,
            _ => {}
        }
        if depth_square < 0 || depth_round < 0 {
            return false;
        }
    }

    let dangling = selector.ends_with(['.', '#'])
        || selector.contains("..")
        || selector.contains(". ")
        || selector.contains("# ");

    depth_square == 0 && depth_round == 0 && !dangling
}
