use super::super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper: a settings path inside a fresh temp dir, file not created.
fn settings_path() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    (temp_dir, path)
}

/// Helper: a settings file with the given content.
fn settings_file(content: &str) -> (TempDir, PathBuf) {
    let (temp_dir, path) = settings_path();
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

fn backups(manager: &SettingsManager) -> Vec<PathBuf> {
    match fs::read_dir(manager.backup_dir()) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn test_new_does_not_touch_filesystem() {
    let (_temp_dir, path) = settings_path();
    let manager = SettingsManager::new(path.clone()).unwrap();

    assert_eq!(manager.settings_path(), path.as_path());
    assert_eq!(manager.backup_dir(), path.parent().unwrap().join("backups"));
    assert!(!path.exists());
    assert!(!manager.backup_dir().exists());
}

#[test]
fn test_new_without_parent_fails() {
    let result = SettingsManager::new(PathBuf::from("/"));
    assert!(matches!(result, Err(ConfigError::NoParentDir(_))));
}

#[test]
fn test_load_missing_file_writes_defaults() {
    let (_temp_dir, path) = settings_path();
    let manager = SettingsManager::new(path.clone()).unwrap();

    let settings = manager.load().unwrap();

    assert_eq!(settings, Settings::default());
    assert!(path.exists(), "defaults should be persisted");
    assert!(backups(&manager).is_empty(), "nothing to back up");
}

#[test]
fn test_load_creates_missing_parent_dir() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("modal-keys").join("data.json");
    let manager = SettingsManager::new(path.clone()).unwrap();

    manager.load().unwrap();
    assert!(path.exists());
}

#[test]
fn test_load_null_blob_is_defaults() {
    let (_temp_dir, path) = settings_file("null");
    let manager = SettingsManager::new(path).unwrap();

    assert_eq!(manager.load().unwrap(), Settings::default());
}

#[test]
fn test_load_malformed_json() {
    let (_temp_dir, path) = settings_file("{ not json");
    let manager = SettingsManager::new(path.clone()).unwrap();

    match manager.load() {
        Err(ConfigError::Parse { path: err_path, .. }) => assert_eq!(err_path, path),
        other => panic!("Expected Parse error, got: {:?}", other),
    }
    // Broken file left untouched
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn test_load_legacy_migrates_and_backs_up() {
    let legacy = r#"{"nextKey":"Alt+KeyJ","previousKey":"Alt+KeyK","closeKey":"Escape","targetClasses":".prompt"}"#;
    let (_temp_dir, path) = settings_file(legacy);
    let manager = SettingsManager::new(path.clone()).unwrap();

    let settings = manager.load().unwrap();
    assert_eq!(settings.next_keys, vec!["Alt+KeyJ".to_string()]);
    assert_eq!(settings.previous_keys, vec!["Alt+KeyK".to_string()]);
    assert_eq!(settings.target_classes, ".prompt");

    // Rewritten in list format, legacy fields gone
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"nextKeys\""));
    assert!(!written.contains("\"nextKey\""));

    // Original kept as a timestamped backup
    let backups = backups(&manager);
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), legacy);

    let filename = backups[0].file_name().unwrap().to_str().unwrap();
    let timestamp = filename.strip_prefix("data.json.").unwrap();
    assert!(
        chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d_%H%M%S").is_ok(),
        "Timestamp should be valid chrono format: {}",
        timestamp,
    );
}

#[test]
fn test_load_cleans_duplicates_and_empty_confirm_list() {
    let dirty = r#"{"nextKeys":["KeyA","KeyA","",""],"previousKeys":["Ctrl+KeyP"],"confirmKeys":[],"closeKeys":["Escape"],"targetClasses":".a"}"#;
    let (_temp_dir, path) = settings_file(dirty);
    let manager = SettingsManager::new(path.clone()).unwrap();

    let report = manager.load_report().unwrap();

    assert_eq!(report.settings.next_keys, vec!["KeyA", ""]);
    assert_eq!(report.settings.confirm_keys, vec![""]);
    assert!(!report.migrated, "current format, nothing to migrate");
    assert!(report.rewritten);

    // Cleaned record persisted
    let on_disk: Settings = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, report.settings);

    // Dirty original kept aside
    let backups = backups(&manager);
    assert_eq!(backups.len(), 1);
    assert_eq!(report.backup.as_ref(), Some(&backups[0]));
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), dirty);
}

#[test]
fn test_load_clean_current_format_is_not_rewritten() {
    let (_temp_dir, path) = settings_path();
    let manager = SettingsManager::new(path.clone()).unwrap();
    let mut settings = Settings {
        next_keys: vec!["Alt+KeyJ".to_string(), "".to_string()],
        ..Settings::default()
    };
    manager.save(&mut settings).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let report = manager.load_report().unwrap();

    assert_eq!(report.settings, settings);
    assert!(!report.migrated);
    assert!(!report.rewritten);
    assert_eq!(report.backup, None);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert!(backups(&manager).is_empty());
}

#[test]
fn test_load_report_for_legacy_file() {
    let (_temp_dir, path) = settings_file(r#"{"closeKey":"KeyQ"}"#);
    let manager = SettingsManager::new(path).unwrap();

    let report = manager.load_report().unwrap();
    assert!(report.migrated);
    assert!(report.rewritten);
    assert!(report.backup.as_ref().is_some_and(|backup| backup.exists()));

    // Second load finds nothing left to do
    let again = manager.load_report().unwrap();
    assert!(!again.migrated);
    assert!(!again.rewritten);
    assert_eq!(again.backup, None);
}

#[test]
fn test_load_report_for_missing_file() {
    let (_temp_dir, path) = settings_path();
    let manager = SettingsManager::new(path).unwrap();

    let report = manager.load_report().unwrap();
    assert!(!report.migrated);
    assert!(report.rewritten);
    assert_eq!(report.backup, None);
}

#[test]
fn test_save_cleans_lists() {
    let (_temp_dir, path) = settings_path();
    let manager = SettingsManager::new(path).unwrap();
    let mut settings = Settings {
        next_keys: vec!["KeyA".into(), "KeyA".into(), "".into(), "".into(), "KeyB".into()],
        confirm_keys: vec![],
        ..Settings::default()
    };

    manager.save(&mut settings).unwrap();

    // In-memory record cleaned too
    assert_eq!(settings.next_keys, vec!["KeyA", "", "KeyB"]);
    assert_eq!(settings.confirm_keys, vec![""]);
    assert_eq!(manager.load().unwrap(), settings);
}

#[test]
fn test_backup_without_file() {
    let (_temp_dir, path) = settings_path();
    let manager = SettingsManager::new(path).unwrap();

    assert_eq!(manager.create_timestamped_backup().unwrap(), None);
}

#[test]
fn test_same_second_backups_do_not_overwrite() {
    let (_temp_dir, path) = settings_file("first");
    let manager = SettingsManager::new(path.clone()).unwrap();

    let first = manager.create_timestamped_backup().unwrap().unwrap();
    fs::write(&path, "second").unwrap();
    let second = manager.create_timestamped_backup().unwrap().unwrap();
    fs::write(&path, "third").unwrap();
    let third = manager.create_timestamped_backup().unwrap().unwrap();

    assert_ne!(first, second);
    assert_ne!(second, third);
    assert_eq!(fs::read_to_string(&first).unwrap(), "first");
    assert_eq!(fs::read_to_string(&second).unwrap(), "second");
    assert_eq!(fs::read_to_string(&third).unwrap(), "third");
    assert_eq!(backups(&manager).len(), 3);
}

#[test]
fn test_default_settings_path_shape() {
    // Not every CI box has a config dir; only check the shape when it does
    if let Ok(path) = default_settings_path() {
        assert!(path.ends_with("modal-keys/data.json"));
    }
}
