//! Notification domain model.
//!
//! # Invariants
//! - `read` is shared by every recipient of a notification; there is no
//!   per-recipient read state.
//! - `sent_to` holds identity ids, not emails.

use crate::model::identity::IdentityId;
use crate::model::timestamp::{self, Timestamp};
use serde::{Deserialize, Serialize};

pub type NotificationId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    /// Display name of the sender.
    pub sender: String,
    #[serde(with = "timestamp::iso")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub sent_to: Vec<IdentityId>,
}

impl Notification {
    pub fn is_for(&self, identity_id: &str) -> bool {
        self.sent_to.iter().any(|id| id == identity_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub sender: String,
    pub sent_to: Vec<IdentityId>,
}

impl NewNotification {
    pub(crate) fn into_notification(self, id: NotificationId, at: Timestamp) -> Notification {
        Notification {
            id,
            title: self.title,
            message: self.message,
            sender: self.sender,
            created_at: at,
            read: false,
            sent_to: self.sent_to,
        }
    }
}
