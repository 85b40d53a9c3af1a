use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or persisting settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings path has no parent directory to hold backups.
    #[error("Settings path has no parent directory: {0}")]
    NoParentDir(PathBuf),
    /// Backup directory cannot be created or written to.
    #[error("Backup directory not writable: {0}")]
    BackupDirNotWritable(PathBuf),
    /// Failed to create backup file.
    #[error("Failed to create backup: {0}")]
    BackupFailed(String),
    /// Settings file is not valid JSON or has the wrong shape.
    #[error("Failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Settings could not be serialised.
    #[error("Failed to serialise settings: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// No config directory on this platform and no explicit path given.
    #[error("Could not determine a config directory; pass --settings")]
    NoConfigDir,
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
