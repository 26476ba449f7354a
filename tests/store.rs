use release_monitor::project::NewProject;
use release_monitor::version::store::{ProjectStore, SqliteStore};
use tempfile::TempDir;

#[test]
fn create_then_get_returns_same_project() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let store = SqliteStore::new(&db_path).unwrap();

    let created = store
        .create(NewProject::new("pagure", "https://pagure.io/pagure", "pagure"))
        .unwrap();

    let loaded = store.get(created.id.unwrap()).unwrap();
    assert_eq!(loaded, Some(created));
}

#[test]
fn commit_updates_existing_project() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let store = SqliteStore::new(&db_path).unwrap();

    let mut project = store
        .create(NewProject::new("pagure", "https://pagure.io/pagure", "pagure"))
        .unwrap();

    project.latest_version = Some("5.0".to_string());
    store.commit(&project, &["5.0".to_string()]).unwrap();

    let saved = store.get(1).unwrap().unwrap();
    assert_eq!(saved.latest_version.as_deref(), Some("5.0"));
    assert_eq!(store.versions(1).unwrap(), vec!["5.0"]);
}
