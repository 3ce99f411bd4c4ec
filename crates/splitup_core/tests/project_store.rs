use splitup_core::db::open_db;
use splitup_core::{
    initialize, Goal, KeyValueStore, MemoryKeyValueStore, ProjectSnapshot, ProjectStore, RepoError,
    RepoResult, SqliteKeyValueStore, PROJECTS_SLOT_KEY,
};
use uuid::Uuid;

fn project(name: &str, image: &[u8]) -> ProjectSnapshot {
    let mut goal = Goal::new(format!("{name} goal"), 4);
    goal.apply(1);
    let mut cells = initialize(4, &[]);
    cells[2].revealed = true;
    ProjectSnapshot {
        id: Uuid::new_v4(),
        image_bytes: image.to_vec(),
        goals: vec![goal],
        project_name: name.to_string(),
        cells,
        grid_visible: true,
    }
}

struct FailingWrites;

impl KeyValueStore for FailingWrites {
    fn read_slot(&self, _key: &str) -> RepoResult<Option<Vec<u8>>> {
        Ok(None)
    }

    fn write_slot(&self, _key: &str, _value: &[u8]) -> RepoResult<()> {
        Err(RepoError::InvalidData("disk full".to_string()))
    }
}

#[test]
fn load_of_empty_slot_is_empty() {
    let backend = MemoryKeyValueStore::new();
    let mut store = ProjectStore::new(&backend);
    assert!(store.load().is_empty());
}

#[test]
fn load_of_corrupt_slot_is_empty() {
    let backend = MemoryKeyValueStore::new();
    backend
        .write_slot(PROJECTS_SLOT_KEY, b"{\"not\": \"a list\"")
        .unwrap();

    let store = ProjectStore::open(&backend);
    assert!(store.projects().is_empty());
}

#[test]
fn save_then_load_roundtrips_exactly() {
    let backend = MemoryKeyValueStore::new();
    let all_bytes = (0u8..=255).collect::<Vec<_>>();
    let projects = vec![project("first", &all_bytes), project("second", &[])];

    let mut store = ProjectStore::new(&backend);
    store.save(projects.clone()).unwrap();

    let mut reopened = ProjectStore::new(&backend);
    let loaded = reopened.load();
    assert_eq!(loaded, projects);
    assert_eq!(loaded[0].image_bytes, all_bytes);
}

#[test]
fn remove_deletes_only_the_target() {
    let backend = MemoryKeyValueStore::new();
    let mut store = ProjectStore::new(&backend);
    let a = project("a", b"a");
    let b = project("b", b"b");
    let c = project("c", b"c");
    for snapshot in [a.clone(), b.clone(), c.clone()] {
        store.add(snapshot).unwrap();
    }

    assert!(store.remove(b.id).unwrap());

    let reloaded = ProjectStore::open(&backend);
    let ids = reloaded
        .projects()
        .iter()
        .map(|project| project.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![a.id, c.id]);
}

#[test]
fn remove_unknown_id_is_noop() {
    let backend = MemoryKeyValueStore::new();
    let mut store = ProjectStore::new(&backend);
    store.add(project("kept", b"k")).unwrap();
    let before = backend.read_slot(PROJECTS_SLOT_KEY).unwrap();

    assert!(!store.remove(Uuid::new_v4()).unwrap());
    assert_eq!(store.projects().len(), 1);
    assert_eq!(backend.read_slot(PROJECTS_SLOT_KEY).unwrap(), before);
}

#[test]
fn add_rejects_duplicate_id() {
    let backend = MemoryKeyValueStore::new();
    let mut store = ProjectStore::new(&backend);
    let snapshot = project("once", b"1");
    store.add(snapshot.clone()).unwrap();

    let err = store.add(snapshot).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert_eq!(store.projects().len(), 1);
}

#[test]
fn write_failure_is_reported_without_rollback() {
    let mut store = ProjectStore::new(FailingWrites);
    let snapshot = project("unsaved", b"x");

    let err = store.add(snapshot.clone()).unwrap_err();
    assert!(err.to_string().contains("disk full"));
    assert_eq!(store.projects(), &[snapshot]);
}

#[test]
fn summaries_follow_saved_order() {
    let backend = MemoryKeyValueStore::new();
    let mut store = ProjectStore::new(&backend);
    let first = project("first", b"thumb-1");
    let second = project("second", b"thumb-2");
    store.add(first.clone()).unwrap();
    store.add(second.clone()).unwrap();

    let summaries = store.summaries();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].id, first.id);
    assert_eq!(summaries[0].name, "first");
    assert_eq!(summaries[1].thumbnail, b"thumb-2".to_vec());
    assert_eq!(store.get(second.id), Some(&second));
}

#[test]
fn sqlite_backend_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("splitup.sqlite3");
    let snapshot = project("durable", &[0, 1, 2, 254, 255]);

    {
        let conn = open_db(&path).unwrap();
        let mut store = ProjectStore::new(SqliteKeyValueStore::new(&conn));
        store.add(snapshot.clone()).unwrap();
        store.add(project("removed", b"r")).unwrap();
        let removed_id = store.projects()[1].id;
        assert!(store.remove(removed_id).unwrap());
    }

    let conn = open_db(&path).unwrap();
    let store = ProjectStore::open(SqliteKeyValueStore::new(&conn));
    assert_eq!(store.projects(), &[snapshot]);
}

#[test]
fn owned_connection_store_keeps_list_when_sqlite_write_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("splitup.sqlite3");
    let kept = project("kept", b"k");
    {
        let conn = open_db(&path).unwrap();
        ProjectStore::new(&conn).save(vec![kept.clone()]).unwrap();
    }

    let mut store = ProjectStore::open(open_db(&path).unwrap());
    let side = rusqlite::Connection::open(&path).unwrap();
    side.execute_batch(
        "CREATE TRIGGER kv_slots_reject_update BEFORE UPDATE ON kv_slots
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
    )
    .unwrap();

    let unsaved = project("unsaved", b"u");
    let err = store.add(unsaved.clone()).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(err.to_string().contains("disk full"));
    assert_eq!(store.projects(), &[kept.clone(), unsaved]);

    drop(store);
    let reopened = ProjectStore::open(open_db(&path).unwrap());
    assert_eq!(reopened.projects(), &[kept]);
}
