use portal_core::{
    authenticate, known_identity_ids, EntityKind, Identity, LocalStorage, MemoryStorage,
    NewNotification, NotificationStore, RepoError,
};

fn identity(email: &str, password: &str) -> Identity {
    authenticate(email, password).unwrap()
}

fn note(title: &str, sent_to: &[&str]) -> NewNotification {
    NewNotification {
        title: title.to_string(),
        message: format!("{title} body"),
        sender: "Admin User".to_string(),
        sent_to: sent_to.iter().map(|id| id.to_string()).collect(),
    }
}

#[test]
fn send_prepends_unread_notification() {
    let inbox = NotificationStore::new(MemoryStorage::new());
    let first = inbox.send(note("first", &["1"]));
    let second = inbox.send(note("second", &["1"]));

    assert!(!first.read);
    assert_ne!(first.id, second.id);
    let stored: Vec<String> = inbox.load().into_iter().map(|n| n.id).collect();
    assert_eq!(stored, vec![second.id, first.id]);
}

#[test]
fn recipient_views_filter_by_id_and_sort_newest_first() {
    let inbox = NotificationStore::new(MemoryStorage::new());
    let admin = identity("admin@example.com", "password");
    let user = identity("user@example.com", "password");

    inbox.send(note("to admin", &["1"]));
    inbox.send(note("to both", &["1", "2"]));
    inbox.send(note("to user", &["2"]));

    let titles = |items: Vec<portal_core::Notification>| -> Vec<String> {
        items.into_iter().map(|n| n.title).collect()
    };
    assert_eq!(titles(inbox.all_for(&admin)), vec!["to both", "to admin"]);
    assert_eq!(titles(inbox.all_for(&user)), vec!["to user", "to both"]);
    assert_eq!(inbox.unread_count(&user), 2);
}

#[test]
fn mark_read_is_shared_by_all_recipients() {
    let inbox = NotificationStore::new(MemoryStorage::new());
    let admin = identity("admin@example.com", "password");
    let user = identity("user@example.com", "password");

    let shared = inbox.send(note("shared", &["1", "2"]));
    inbox.send(note("admin only", &["1"]));

    let marked = inbox.mark_read(&shared.id).unwrap();
    assert!(marked.read);

    assert_eq!(inbox.unread_count(&user), 0);
    assert!(inbox.unread_for(&user).is_empty());
    assert_eq!(inbox.all_for(&user).len(), 1);
    let admin_unread: Vec<String> = inbox.unread_for(&admin).into_iter().map(|n| n.title).collect();
    assert_eq!(admin_unread, vec!["admin only"]);
}

#[test]
fn mark_read_unknown_id_is_not_found() {
    let inbox = NotificationStore::new(MemoryStorage::new());
    let err = inbox.mark_read("missing").unwrap_err();
    assert_eq!(
        err,
        RepoError::NotFound {
            kind: EntityKind::Notification,
            id: "missing".to_string()
        }
    );
}

#[test]
fn broadcast_reaches_every_known_identity() {
    let inbox = NotificationStore::new(MemoryStorage::new());
    let admin = identity("admin@example.com", "password");
    let sent = inbox.broadcast(&admin, "Maintenance", "Tonight at 22:00", known_identity_ids());

    assert_eq!(sent.sender, "Admin User");
    for (email, password) in [
        ("admin@example.com", "password"),
        ("user@example.com", "password"),
        ("newuser@example.com", "temp123"),
    ] {
        assert_eq!(inbox.unread_count(&identity(email, password)), 1);
    }
}

#[test]
fn malformed_blob_reads_as_empty_inbox() {
    let storage = MemoryStorage::new();
    storage.set_item("notifications", "[{\"id\": 3}").unwrap();
    let inbox = NotificationStore::new(&storage);
    assert!(inbox.load().is_empty());

    inbox.send(note("fresh", &["2"]));
    assert_eq!(inbox.load().len(), 1);
}

#[test]
fn stored_shape_uses_camel_case_and_iso_dates() {
    let storage = MemoryStorage::new();
    let inbox = NotificationStore::new(&storage);
    inbox.send(note("shape", &["3"]));

    let raw = storage.get_item("notifications").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let item = &value[0];
    assert_eq!(item["sentTo"], serde_json::json!(["3"]));
    assert_eq!(item["read"], false);
    let created_at = item["createdAt"].as_str().unwrap();
    assert!(created_at.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
}
