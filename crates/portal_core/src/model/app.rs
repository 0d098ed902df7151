//! App portal domain model.
//!
//! # Responsibility
//! - Define the persisted shape of app portals and their members.
//! - Provide creation/patch inputs for repository writes.
//!
//! # Invariants
//! - `id` is opaque and never reused for another app.
//! - `updated_at >= created_at`, and every repository mutation moves it forward.
//! - Member emails are unique within one app (enforced by repository writes).
//! - The creator's membership (`email == created_by`) is protected only by
//!   callers; nothing here refuses to remove it.

use crate::model::permission::Permission;
use crate::model::timestamp::{self, Timestamp};
use log::warn;
use serde::{Deserialize, Serialize};

pub type AppId = String;
pub type MemberId = String;

/// One person granted access to an app portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMember {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Missing or invalid stored values load as `Viewer`.
    #[serde(default)]
    pub permission: Permission,
}

/// A configured link entity with an access list.
///
/// Loads go through [`StoredAppPortal`], so an unreadable timestamp never
/// rejects the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredAppPortal")]
pub struct AppPortal {
    pub id: AppId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo_url: String,
    pub url: String,
    /// Creator email.
    pub created_by: String,
    #[serde(with = "timestamp::iso")]
    pub created_at: Timestamp,
    #[serde(with = "timestamp::iso")]
    pub updated_at: Timestamp,
    #[serde(default)]
    pub users: Vec<AppMember>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Persisted app shape with timestamps that may be missing or unreadable.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAppPortal {
    id: AppId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    logo_url: String,
    url: String,
    created_by: String,
    #[serde(default, deserialize_with = "timestamp::lenient::deserialize")]
    created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "timestamp::lenient::deserialize")]
    updated_at: Option<Timestamp>,
    #[serde(default)]
    users: Vec<AppMember>,
    #[serde(default = "default_active")]
    is_active: bool,
}

impl From<StoredAppPortal> for AppPortal {
    /// A lost timestamp takes the other one, or the current time if both are lost.
    fn from(stored: StoredAppPortal) -> Self {
        let (created_at, updated_at) = match (stored.created_at, stored.updated_at) {
            (Some(created), Some(updated)) => (created, updated),
            (Some(at), None) | (None, Some(at)) => {
                warn!(
                    "event=app_load module=model status=coerced error_code=invalid_timestamp app_id={}",
                    stored.id
                );
                (at, at)
            }
            (None, None) => {
                warn!(
                    "event=app_load module=model status=coerced error_code=invalid_timestamps app_id={}",
                    stored.id
                );
                let now = timestamp::now();
                (now, now)
            }
        };
        Self {
            id: stored.id,
            title: stored.title,
            description: stored.description,
            logo_url: stored.logo_url,
            url: stored.url,
            created_by: stored.created_by,
            created_at,
            updated_at,
            users: stored.users,
            is_active: stored.is_active,
        }
    }
}

fn default_active() -> bool {
    true
}

impl AppPortal {
    pub fn member(&self, member_id: &str) -> Option<&AppMember> {
        self.users.iter().find(|member| member.id == member_id)
    }

    pub fn member_by_email(&self, email: &str) -> Option<&AppMember> {
        self.users.iter().find(|member| member.email == email)
    }

    pub fn has_member_email(&self, email: &str) -> bool {
        self.member_by_email(email).is_some()
    }

    /// Whether `member` is the app creator, whose membership callers keep.
    pub fn is_creator(&self, member: &AppMember) -> bool {
        member.email == self.created_by
    }

    /// First email listed more than once in `users`.
    pub fn duplicate_member_email(users: &[AppMember]) -> Option<&str> {
        users.iter().enumerate().find_map(|(index, member)| {
            users[..index]
                .iter()
                .any(|earlier| earlier.email == member.email)
                .then_some(member.email.as_str())
        })
    }

    /// Refreshes `updated_at`, strictly later than its previous value.
    pub fn touch(&mut self) {
        self.updated_at = timestamp::now_after(self.updated_at);
    }
}

/// Input for creating an app; id and timestamps are generated on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApp {
    pub title: String,
    pub description: String,
    pub logo_url: String,
    pub url: String,
    pub created_by: String,
    pub is_active: bool,
    pub users: Vec<AppMember>,
}

impl NewApp {
    /// Active app with no description, logo or members.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            logo_url: String::new(),
            url: url.into(),
            created_by: created_by.into(),
            is_active: true,
            users: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_logo_url(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = logo_url.into();
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_users(mut self, users: Vec<AppMember>) -> Self {
        self.users = users;
        self
    }

    pub(crate) fn into_portal(self, id: AppId, at: Timestamp) -> AppPortal {
        AppPortal {
            id,
            title: self.title,
            description: self.description,
            logo_url: self.logo_url,
            url: self.url,
            created_by: self.created_by,
            created_at: at,
            updated_at: at,
            users: self.users,
            is_active: self.is_active,
        }
    }
}

/// Partial update merged over an existing app.
///
/// `id`, `created_at` and `updated_at` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub url: Option<String>,
    pub created_by: Option<String>,
    pub is_active: Option<bool>,
    pub users: Option<Vec<AppMember>>,
}

impl AppPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply_to(&self, app: &mut AppPortal) {
        if let Some(title) = &self.title {
            app.title = title.clone();
        }
        if let Some(description) = &self.description {
            app.description = description.clone();
        }
        if let Some(logo_url) = &self.logo_url {
            app.logo_url = logo_url.clone();
        }
        if let Some(url) = &self.url {
            app.url = url.clone();
        }
        if let Some(created_by) = &self.created_by {
            app.created_by = created_by.clone();
        }
        if let Some(is_active) = self.is_active {
            app.is_active = is_active;
        }
        if let Some(users) = &self.users {
            app.users = users.clone();
        }
    }
}

/// Input for adding a member; the permission is raw and gets coerced on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub permission: String,
}

impl NewMember {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        permission: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            avatar: None,
            permission: permission.into(),
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub(crate) fn into_member(self, id: MemberId) -> AppMember {
        AppMember {
            id,
            name: self.name,
            email: self.email,
            avatar: self.avatar,
            permission: Permission::coerce(&self.permission),
        }
    }
}
