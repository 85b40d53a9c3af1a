//! Settings persistence with atomic writes and backup support.
//!
//! This module owns the on-disk settings blob:
//!
//! - **Migration on load**: old single-shortcut records are upgraded and cleaned once
//! - **Backups**: a record is copied aside before load rewrites it
//! - **Atomic writes**: temp-file-then-rename, never a half-written blob
//! - **List hygiene**: every save deduplicates the shortcut lists first
//!
//! # Example
//!
//! ```no_run
//! use modal_keys::config::SettingsManager;
//!
//! let manager = SettingsManager::new("/home/user/.config/modal-keys/data.json".into())?;
//!
//! let mut settings = manager.load()?;
//! settings.next_keys.push("Alt+KeyJ".to_string());
//! manager.save(&mut settings)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use atomic_write_file::AtomicWriteFile;
use chrono::Local;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{
    cleanup_shortcut_list, cleanup_shortcut_lists, migrate_settings, Settings, StoredSettings,
};

/// Directory under the platform config dir that holds the settings blob
pub const APP_DIR: &str = "modal-keys";
/// Settings file name
pub const SETTINGS_FILE: &str = "data.json";

/// Default settings path: `<config_dir>/modal-keys/data.json`
pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// Outcome of [`SettingsManager::load_report`]
#[derive(Debug)]
pub struct LoadReport {
    /// Canonical, cleaned settings
    pub settings: Settings,
    /// The stored record had the old shape or was missing fields
    pub migrated: bool,
    /// The settings file was written during load
    pub rewritten: bool,
    /// Copy of the previous file, when one was made
    pub backup: Option<PathBuf>,
}

/// Reads and writes the settings blob.
///
/// The file itself is optional: a missing file loads as defaults and is
/// created on the first save. Backups go to a `backups/` directory next to
/// the file.
#[derive(Debug)]
pub struct SettingsManager {
    /// Path to the settings JSON file.
    settings_path: PathBuf,
    backup_dir: PathBuf,
}

impl SettingsManager {
    /// Creates a manager for the given settings file.
    ///
    /// Does not touch the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoParentDir` if the path has no parent.
    pub fn new(settings_path: PathBuf) -> Result<Self, ConfigError> {
        let backup_dir = settings_path
            .parent()
            .ok_or_else(|| ConfigError::NoParentDir(settings_path.clone()))?
            .join("backups");

        Ok(Self {
            settings_path,
            backup_dir,
        })
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Reads the stored record without migrating it.
    ///
    /// Returns `None` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and `ConfigError::Io`
    /// for any other read failure.
    pub fn read_stored(&self) -> Result<Option<StoredSettings>, ConfigError> {
        let content = match fs::read_to_string(&self.settings_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // The host writes `null` for a plugin that never saved
        if content.trim().is_empty() || content.trim() == "null" {
            return Ok(Some(StoredSettings::default()));
        }

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: self.settings_path.clone(),
                source,
            })
    }

    /// Loads, migrates and cleans settings, rewriting the file if either changed it.
    ///
    /// See [`SettingsManager::load_report`].
    pub fn load(&self) -> Result<Settings, ConfigError> {
        self.load_report().map(|report| report.settings)
    }

    /// Like [`SettingsManager::load`], but also says what loading did to the file.
    ///
    /// A missing file loads as defaults and is written out. An existing file
    /// is rewritten, after a backup, when it still has the old shape or when
    /// list cleanup changed it (duplicates, extra or missing placeholders).
    pub fn load_report(&self) -> Result<LoadReport, ConfigError> {
        let Some(stored) = self.read_stored()? else {
            debug!(path = %self.settings_path.display(), "no settings file, using defaults");
            let mut settings = Settings::default();
            self.save(&mut settings)?;
            return Ok(LoadReport {
                settings,
                migrated: false,
                rewritten: true,
                backup: None,
            });
        };

        let migrated = stored.needs_migration();
        let mut settings = migrate_settings(stored);
        let before_cleanup = settings.clone();
        cleanup_shortcut_lists(&mut settings);

        if !migrated && settings == before_cleanup {
            return Ok(LoadReport {
                settings,
                migrated: false,
                rewritten: false,
                backup: None,
            });
        }

        let backup = self.create_timestamped_backup()?;
        self.save(&mut settings)?;
        info!(
            path = %self.settings_path.display(),
            backup = ?backup,
            migrated,
            "rewrote settings on load"
        );

        Ok(LoadReport {
            settings,
            migrated,
            rewritten: true,
            backup,
        })
    }

    /// Cleans the shortcut lists and writes settings atomically.
    ///
    /// Cleanup mutates `settings` so the in-memory record matches what was
    /// written.
    pub fn save(&self, settings: &mut Settings) -> Result<(), ConfigError> {
        cleanup_shortcut_lists(settings);

        let json = serde_json::to_string_pretty(settings)?;

        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = AtomicWriteFile::options()
            .open(&self.settings_path)
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

        file.write_all(json.as_bytes())
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

        file.commit()
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

        debug!(path = %self.settings_path.display(), "settings saved");
        Ok(())
    }

    /// Copies the current settings file into the backup directory.
    ///
    /// Returns `None` when there is no file to back up.
    pub fn create_timestamped_backup(&self) -> Result<Option<PathBuf>, ConfigError> {
        if !self.settings_path.exists() {
            return Ok(None);
        }

        if !self.backup_dir.exists() {
            fs::create_dir_all(&self.backup_dir)
                .map_err(|_| ConfigError::BackupDirNotWritable(self.backup_dir.clone()))?;
        }

        let content = fs::read_to_string(&self.settings_path)?;

        // Timestamp in YYYY-MM-DD_HHMMSS format
        let timestamp = Local::now().format("%Y-%m-%d_%H%M%S");

        let original_name = self
            .settings_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(SETTINGS_FILE);

        // Same-second backups get a counter instead of overwriting
        let base_name = format!("{}.{}", original_name, timestamp);
        let mut backup_path = self.backup_dir.join(&base_name);
        let mut counter = 1;
        while backup_path.exists() {
            backup_path = self.backup_dir.join(format!("{}.{}", base_name, counter));
            counter += 1;
        }

        fs::write(&backup_path, content)
            .map_err(|e| ConfigError::BackupFailed(format!("{}: {}", backup_path.display(), e)))?;

        Ok(Some(backup_path))
    }
}

#[cfg(test)]
mod tests;
