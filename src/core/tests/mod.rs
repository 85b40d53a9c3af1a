//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Shortcut parsing
//! - Event matching and formatting
//! - Dispatch decisions
//! - Shortcut linting
//! - Type tests (KeyBinding, Action, etc.)

#[cfg(test)]
mod dispatch_tests;
#[cfg(test)]
mod validator_tests;
