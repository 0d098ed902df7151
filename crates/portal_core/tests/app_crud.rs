use portal_core::{
    AppCollection, AppConfigStore, AppPatch, AppRepository, EntityKind, LocalAppRepository,
    MemoryStorage, MirrorHook, NewApp, RepoError, SqliteStorage,
};
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

#[test]
fn list_returns_defaults_on_first_run() {
    let store = AppConfigStore::new(MemoryStorage::new());
    let repo = LocalAppRepository::new(&store);

    let apps = repo.list_apps();
    assert_eq!(apps, AppCollection::defaults().apps);
}

#[test]
fn create_generates_unique_ids_and_equal_timestamps() {
    let store = AppConfigStore::new(MemoryStorage::new());
    let repo = LocalAppRepository::new(&store);

    let mut ids = HashSet::new();
    for n in 0..20 {
        let app = repo.create_app(NewApp::new(
            format!("Portal {n}"),
            format!("https://{n}.example"),
            "admin@example.com",
        ))
        .unwrap();
        assert_eq!(app.created_at, app.updated_at);
        assert!(ids.insert(app.id.clone()), "duplicate id {}", app.id);
    }

    let apps = repo.list_apps();
    assert_eq!(apps.len(), 22);
    let all_ids: HashSet<&str> = apps.iter().map(|app| app.id.as_str()).collect();
    assert_eq!(all_ids.len(), apps.len());
}

#[test]
fn create_portal_a_scenario() {
    let store = AppConfigStore::new(MemoryStorage::new());
    let repo = LocalAppRepository::new(&store);

    let app = repo.create_app(NewApp::new(
        "Portal A",
        "https://a.example",
        "admin@example.com",
    ))
    .unwrap();
    assert!(!app.id.is_empty());
    assert!(app.is_active);
    assert!(app.users.is_empty());
    assert_eq!(repo.get_app(&app.id), Some(app));
}

#[test]
fn empty_update_only_moves_updated_at_forward() {
    let store = AppConfigStore::new(MemoryStorage::new());
    let repo = LocalAppRepository::new(&store);
    let before = repo.get_app("1").unwrap();

    let after = repo.update_app("1", &AppPatch::default()).unwrap();
    assert!(after.updated_at > before.updated_at);

    let mut normalized = after.clone();
    normalized.updated_at = before.updated_at;
    assert_eq!(normalized, before);
    assert_eq!(repo.get_app("1"), Some(after));
}

#[test]
fn back_to_back_updates_strictly_increase_updated_at() {
    let store = AppConfigStore::new(MemoryStorage::new());
    let repo = LocalAppRepository::new(&store);
    let created = repo
        .create_app(NewApp::new("Fast", "https://fast.example", "a@x.com"))
        .unwrap();

    let mut last = created.updated_at;
    for _ in 0..50 {
        let next = repo.update_app(&created.id, &AppPatch::default()).unwrap();
        assert!(next.updated_at > last);
        last = next.updated_at;
    }
}

#[test]
fn update_merges_patch_fields() {
    let store = AppConfigStore::new(MemoryStorage::new());
    let repo = LocalAppRepository::new(&store);

    let patch = AppPatch {
        title: Some("Customer Hub".to_string()),
        is_active: Some(false),
        ..AppPatch::default()
    };
    let updated = repo.update_app("1", &patch).unwrap();
    assert_eq!(updated.title, "Customer Hub");
    assert!(!updated.is_active);
    assert_eq!(updated.url, "https://customer.example.com");
    assert_eq!(updated.users.len(), 2);
}

#[test]
fn update_missing_app_returns_not_found() {
    let store = AppConfigStore::new(MemoryStorage::new());
    let repo = LocalAppRepository::new(&store);

    let err = repo.update_app("missing", &AppPatch::default()).unwrap_err();
    assert_eq!(
        err,
        RepoError::NotFound {
            kind: EntityKind::App,
            id: "missing".to_string()
        }
    );
}

#[test]
fn delete_removes_app_and_missing_delete_preserves_collection() {
    let store = AppConfigStore::new(MemoryStorage::new());
    let repo = LocalAppRepository::new(&store);

    repo.delete_app("2").unwrap();
    assert_eq!(repo.list_apps().len(), 1);
    assert!(repo.get_app("2").is_none());

    let err = repo.delete_app("2").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(repo.list_apps().len(), 1);
}

#[test]
fn writes_persist_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.sqlite3");

    let created_id = {
        let storage = SqliteStorage::open(&path).unwrap();
        let store = AppConfigStore::new(storage);
        let repo = LocalAppRepository::new(&store);
        repo.delete_app("1").unwrap();
        repo.create_app(NewApp::new("Durable", "https://durable.example", "a@x.com"))
            .unwrap()
            .id
    };

    let storage = SqliteStorage::open(&path).unwrap();
    let store = AppConfigStore::new(storage);
    let repo = LocalAppRepository::new(&store);
    let ids: Vec<String> = repo.list_apps().into_iter().map(|app| app.id).collect();
    assert_eq!(ids, vec!["2".to_string(), created_id]);
}

struct CountingMirror(Rc<Cell<usize>>);

impl MirrorHook for CountingMirror {
    fn mirror(&self, _collection: &AppCollection) -> Result<(), String> {
        self.0.set(self.0.get() + 1);
        Err("endpoint unavailable".to_string())
    }
}

#[test]
fn mirror_runs_after_each_save_and_its_failure_is_not_fatal() {
    let calls = Rc::new(Cell::new(0));
    let store = AppConfigStore::with_mirror(
        MemoryStorage::new(),
        Box::new(CountingMirror(Rc::clone(&calls))),
    );
    let repo = LocalAppRepository::new(&store);

    let app = repo
        .create_app(NewApp::new("Mirrored", "https://m.example", "a@x.com"))
        .unwrap();
    repo.update_app(&app.id, &AppPatch::default()).unwrap();
    assert!(repo.delete_app("missing").is_err());

    assert_eq!(calls.get(), 2);
    assert!(repo.get_app(&app.id).is_some());
}
