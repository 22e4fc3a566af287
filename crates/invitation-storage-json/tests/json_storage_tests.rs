use std::fs;

use invitation_domain::{FieldValue, ProgressiveData};
use invitation_storage_json::{JsonSessionStore, StorageError, SESSION_SCHEMA_VERSION};
use tempfile::tempdir;

fn sample() -> ProgressiveData {
    let mut data = ProgressiveData {
        template_id: "tpl-olivos".into(),
        ..ProgressiveData::default()
    };
    data.overrides
        .insert("groom_name".into(), FieldValue::text("Juan"));
    data.overrides
        .insert("party_enabled".into(), FieldValue::Toggle(true));
    data.touched.insert("groom_name".into());
    data.touched.insert("party_enabled".into());
    data.defaults
        .insert("groom_name".into(), FieldValue::text("Carlos"));
    data
}

#[test]
fn json_store_can_save_and_load_session() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSessionStore::new(dir.path().join("sessions")).expect("create store");

    let path = store.save("Boda Juan", &sample()).expect("save session");
    let loaded = store.load("Boda Juan").expect("load session");

    assert_eq!(loaded, sample());
    assert_eq!(path, store.session_path("boda_juan"));
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(!path.with_extension("json.tmp").exists());

    let raw = fs::read_to_string(&path).expect("read file");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(json["schema_version"], SESSION_SCHEMA_VERSION);
    assert_eq!(json["overrides"]["groom_name"], "Juan");
}

#[test]
fn missing_session_is_not_found() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSessionStore::new(dir.path().to_path_buf()).expect("create store");

    let err = store.load("ghost").expect_err("missing session");
    assert!(matches!(err, StorageError::NotFound(name) if name == "ghost"));
}

#[test]
fn list_and_delete_sessions() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSessionStore::new(dir.path().to_path_buf()).expect("create store");

    store.save("beta", &sample()).expect("save beta");
    store.save("alpha", &sample()).expect("save alpha");
    assert_eq!(store.list().expect("list"), vec!["alpha", "beta"]);

    store.delete("alpha").expect("delete");
    store.delete("alpha").expect("delete twice");
    assert_eq!(store.list().expect("list"), vec!["beta"]);
}

#[test]
fn overwriting_keeps_a_backup_and_restores_it() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSessionStore::with_retention(
        dir.path().join("sessions"),
        dir.path().join("backups"),
        2,
    )
    .expect("create store");

    store.save("boda", &sample()).expect("first save");
    assert!(store.list_backups("boda").expect("backups").is_empty());

    let mut edited = sample();
    edited
        .overrides
        .insert("groom_name".into(), FieldValue::text("Diego"));
    store.save("boda", &edited).expect("second save");

    let backups = store.list_backups("boda").expect("backups");
    assert_eq!(backups.len(), 1);
    assert!(backups[0].created_at.is_some());

    let restored = store
        .restore_backup("boda", &backups[0].id)
        .expect("restore backup");
    assert_eq!(restored, sample());
    assert_eq!(store.load("boda").expect("load"), sample());
}

#[test]
fn backups_respect_retention() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSessionStore::with_retention(
        dir.path().join("sessions"),
        dir.path().join("backups"),
        1,
    )
    .expect("create store");

    for _ in 0..4 {
        store.save("boda", &sample()).expect("save");
    }
    assert!(store.list_backups("boda").expect("backups").len() <= 1);
}

#[test]
fn bare_progressive_data_files_load() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSessionStore::new(dir.path().to_path_buf()).expect("create store");
    let bare = serde_json::to_string(&sample()).expect("serialize");
    fs::write(store.session_path("legacy"), bare).expect("write");

    assert_eq!(store.load("legacy").expect("load"), sample());
}

#[test]
fn newer_schema_versions_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSessionStore::new(dir.path().to_path_buf()).expect("create store");
    fs::write(
        store.session_path("future"),
        r#"{"schema_version": 99, "template_id": "x"}"#,
    )
    .expect("write");

    let err = store.load("future").expect_err("future schema");
    assert!(matches!(err, StorageError::UnsupportedSchema(99)));
}
