//! Config module tests
//!
//! - Settings defaults, migration and list cleanup
//! - Settings editing operations
//! - SettingsManager persistence, migration on load, backups

#[cfg(test)]
mod manager_tests;
