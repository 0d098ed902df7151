//! Notification inbox persisted under the `notifications` key.
//!
//! # Responsibility
//! - Send, read-mark and list notifications per recipient.
//!
//! # Invariants
//! - New notifications are prepended, so storage order is newest first.
//! - Marking read is global: every recipient sees the same `read` flag.
//! - Recipient views are sorted by `created_at` descending.
//! - Malformed stored blobs read as an empty inbox.

use crate::model::identity::Identity;
use crate::model::notification::{NewNotification, Notification};
use crate::model::timestamp;
use crate::repo::app_repo::{EntityKind, RepoError, RepoResult};
use crate::storage::{keys, read_json, write_json, LocalStorage};
use crate::store::new_record_id;
use log::{error, info};

pub struct NotificationStore<S: LocalStorage> {
    storage: S,
}

impl<S: LocalStorage> NotificationStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Every stored notification, in storage order.
    pub fn load(&self) -> Vec<Notification> {
        match read_json::<Vec<Notification>>(&self.storage, keys::NOTIFICATIONS) {
            Ok(items) => items.unwrap_or_default(),
            Err(err) => {
                error!(
                    "event=notification_load module=store status=empty error_code=malformed_storage error={err}"
                );
                Vec::new()
            }
        }
    }

    fn save(&self, items: &[Notification]) {
        if let Err(err) = write_json(&self.storage, keys::NOTIFICATIONS, items) {
            error!(
                "event=notification_save module=store status=error error_code=save_failed count={} error={err}",
                items.len()
            );
        }
    }

    /// Stores a new unread notification in front of the inbox.
    pub fn send(&self, notification: NewNotification) -> Notification {
        let created = notification.into_notification(new_record_id(), timestamp::now());

        let mut items = self.load();
        items.insert(0, created.clone());
        self.save(&items);

        info!(
            "event=notification_send module=store status=ok notification_id={} recipients={}",
            created.id,
            created.sent_to.len()
        );
        created
    }

    /// Sends one notification from `sender` to every id in `recipients`.
    pub fn broadcast(
        &self,
        sender: &Identity,
        title: impl Into<String>,
        message: impl Into<String>,
        recipients: Vec<String>,
    ) -> Notification {
        self.send(NewNotification {
            title: title.into(),
            message: message.into(),
            sender: sender.name.clone(),
            sent_to: recipients,
        })
    }

    /// Marks a notification read for all of its recipients.
    pub fn mark_read(&self, id: &str) -> RepoResult<Notification> {
        let mut items = self.load();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| RepoError::NotFound {
                kind: EntityKind::Notification,
                id: id.to_string(),
            })?;
        item.read = true;
        let updated = item.clone();
        self.save(&items);

        info!("event=notification_read module=store status=ok notification_id={id}");
        Ok(updated)
    }

    pub fn all_for(&self, identity: &Identity) -> Vec<Notification> {
        self.select_for(identity, |_| true)
    }

    pub fn unread_for(&self, identity: &Identity) -> Vec<Notification> {
        self.select_for(identity, |item| !item.read)
    }

    pub fn unread_count(&self, identity: &Identity) -> usize {
        self.load()
            .iter()
            .filter(|item| !item.read && item.is_for(&identity.id))
            .count()
    }

    fn select_for(
        &self,
        identity: &Identity,
        keep: impl Fn(&Notification) -> bool,
    ) -> Vec<Notification> {
        let mut items: Vec<Notification> = self
            .load()
            .into_iter()
            .filter(|item| item.is_for(&identity.id) && keep(item))
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }
}
