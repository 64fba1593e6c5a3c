use std::fs;

use anyhow::Result;

use super::FileStore;
use crate::domain::models::KeyValueStore;

#[test]
fn it_returns_none_for_missing_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path().join("credentials.json"));

    assert_eq!(store.get("access-token")?, None);

    return Ok(());
}

#[test]
fn it_sets_and_gets_creating_parent_dirs() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file_path = dir.path().join("nested/taskdesk/credentials.json");
    let store = FileStore::new(file_path.clone());

    store.set("access-token", r#"{"token":"abc"}"#)?;
    store.set("other", "value")?;

    assert!(file_path.exists());
    assert_eq!(store.get("access-token")?, Some(r#"{"token":"abc"}"#.to_string()));
    assert_eq!(store.get("other")?, Some("value".to_string()));

    return Ok(());
}

#[test]
fn it_clears_keys_and_removes_empty_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file_path = dir.path().join("credentials.json");
    let store = FileStore::new(file_path.clone());

    store.set("access-token", "a")?;
    store.set("other", "b")?;
    store.clear("access-token")?;
    assert_eq!(store.get("access-token")?, None);
    assert!(file_path.exists());

    store.clear("other")?;
    assert!(!file_path.exists());

    store.clear("other")?;

    return Ok(());
}

#[test]
fn it_fails_reading_corrupt_file_but_recovers_on_write() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file_path = dir.path().join("credentials.json");
    fs::write(&file_path, "not json")?;

    let store = FileStore::new(file_path);
    assert!(store.get("access-token").is_err());

    store.set("access-token", "a")?;
    assert_eq!(store.get("access-token")?, Some("a".to_string()));

    return Ok(());
}

#[test]
fn it_replaces_corrupt_file_on_clear() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file_path = dir.path().join("credentials.json");
    fs::write(&file_path, "{\"access-token\": ")?;

    let store = FileStore::new(file_path.clone());
    store.clear("access-token")?;

    assert!(!file_path.exists());
    assert_eq!(store.get("access-token")?, None);

    return Ok(());
}
