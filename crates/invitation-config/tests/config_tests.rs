use invitation_config::{ConfigError, ConfigManager, EditorConfig};
use invitation_domain::FieldMode;
use tempfile::tempdir;

#[test]
fn default_config_is_spanish_basic() {
    let cfg = EditorConfig::default();

    assert_eq!(cfg.locale, "es-PE");
    assert_eq!(cfg.default_mode, FieldMode::Basic);
    assert!(cfg.ui_color_enabled);
    assert!(cfg.date_fallback.is_none());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("nope").join("config.json"));

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, EditorConfig::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = EditorConfig::default();
    cfg.set("locale", "en-US").expect("locale");
    cfg.set("default_mode", "full").expect("mode");
    cfg.set("date_fallback", "Pronto").expect("fallback");

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn partial_files_fill_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"locale": "es-MX"}"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load config");
    assert_eq!(loaded.locale, "es-MX");
    assert_eq!(loaded.default_mode, FieldMode::Basic);
    assert!(loaded.ui_color_enabled);
}

#[test]
fn corrupt_files_report_serde_errors() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").expect("write");

    let err = ConfigManager::new(path).load().expect_err("corrupt config");
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn set_rejects_unknown_keys_and_bad_values() {
    let mut cfg = EditorConfig::default();
    assert!(matches!(
        cfg.set("theme", "dark"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(cfg.set("default_mode", "expert").is_err());
    assert!(cfg.set("ui_color_enabled", "maybe").is_err());

    cfg.set("date_fallback", "").expect("clear");
    assert!(cfg.date_fallback.is_none());
}

#[test]
fn sessions_dir_defaults_under_base() {
    let dir = tempdir().expect("tempdir");
    let mut cfg = EditorConfig::default();
    assert_eq!(
        cfg.resolve_sessions_dir(dir.path()),
        dir.path().join("sessions")
    );

    cfg.set("sessions_dir", "/srv/boda").expect("sessions dir");
    assert_eq!(
        cfg.resolve_sessions_dir(dir.path()),
        std::path::PathBuf::from("/srv/boda")
    );
}
