use designkit_settings::{Config, ConfigError, SettingsError, SettingsManager};
use tempfile::TempDir;

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.editor.workspace_width = 1080.0;
    config.editor.history_limit = Some(25);
    config.remote.timeout_ms = 5_000;
    config.save_to_file(&path).expect("save");

    let loaded = Config::load_from_file(&path).expect("load");
    assert_eq!(loaded.editor, config.editor);
    assert_eq!(loaded.remote.timeout_ms, 5_000);
    assert_eq!(loaded.export, config.export);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.export.file_prefix = "poster".to_string();
    config.save_to_file(&path).expect("save");

    let loaded = Config::load_from_file(&path).expect("load");
    assert_eq!(loaded.export.file_prefix, "poster");
    assert_eq!(loaded.editor, config.editor);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[editor]\nfit_ratio = 0.5\n").expect("write");

    let loaded = Config::load_from_file(&path).expect("load");
    assert_eq!(loaded.editor.fit_ratio, 0.5);
    assert_eq!(loaded.editor.workspace_height, 1200.0);
    assert_eq!(loaded.remote.api_base_url, "http://localhost:5000/api");

    let editor = loaded.to_editor_config();
    assert_eq!(editor.surface.fit_ratio, 0.5);
    assert_eq!(editor.import_max_dimension, 500.0);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "editor: {}").expect("write");

    let err = Config::load_from_file(&path).expect_err("yaml is not supported");
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
    ));
}

#[test]
fn test_invalid_values_are_rejected_on_load() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"editor": {"workspace_width": -1}}"#).expect("write");

    let err = Config::load_from_file(&path).expect_err("negative width");
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::ValueOutOfRange { .. })
    ));
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ nope").expect("write");

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::Json(_))
    ));
}

#[test]
fn test_manager_defaults_then_save() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.toml");

    let mut manager = SettingsManager::load_or_default(&path).expect("defaults");
    assert_eq!(manager.config().editor.workspace_width, 900.0);
    assert!(!path.exists());

    manager.config_mut().editor.resize_debounce_ms = 40;
    manager.save().expect("save");

    let reloaded = SettingsManager::load_or_default(&path).expect("reload");
    assert_eq!(reloaded.config().editor.resize_debounce_ms, 40);
    assert_eq!(reloaded.path(), path.as_path());
}

#[test]
fn test_missing_file_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");
    match Config::load_from_file(&path) {
        Err(SettingsError::Read { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected read error, got {:?}", other),
    }
}
