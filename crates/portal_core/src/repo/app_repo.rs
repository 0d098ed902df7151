//! App repository contracts and the local-storage implementation.
//!
//! # Responsibility
//! - Provide create/update/delete/list over the persisted app collection.
//! - Turn missing targets and duplicates into semantic errors.
//!
//! # Invariants
//! - Every write is one full load -> mutate -> save cycle.
//! - Failed operations save nothing.
//! - Lookups are linear scans by id.

use crate::model::app::{AppId, AppMember, AppPatch, AppPortal, NewApp};
use crate::model::timestamp;
use crate::storage::LocalStorage;
use crate::store::app_store::AppConfigStore;
use crate::store::new_record_id;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Kind of record a `NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    App,
    Member,
    Notification,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::App => "app",
            Self::Member => "member",
            Self::Notification => "notification",
        })
    }
}

/// Semantic repository failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Operation target absent.
    NotFound { kind: EntityKind, id: String },
    /// Member email already present in the app, or listed twice in one write.
    Conflict { app_id: AppId, email: String },
}

impl RepoError {
    pub(crate) fn app_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: EntityKind::App,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Conflict { app_id, email } => {
                write!(f, "member `{email}` already exists in app {app_id}")
            }
        }
    }
}

impl Error for RepoError {}

fn reject_duplicate_emails(app_id: &str, users: &[AppMember]) -> RepoResult<()> {
    match AppPortal::duplicate_member_email(users) {
        Some(email) => {
            warn!("event=app_write module=repo status=conflict app_id={app_id}");
            Err(RepoError::Conflict {
                app_id: app_id.to_string(),
                email: email.to_string(),
            })
        }
        None => Ok(()),
    }
}

/// CRUD contract for app portals.
pub trait AppRepository {
    fn list_apps(&self) -> Vec<AppPortal>;
    fn get_app(&self, id: &str) -> Option<AppPortal>;
    fn create_app(&self, app: NewApp) -> RepoResult<AppPortal>;
    fn update_app(&self, id: &str, patch: &AppPatch) -> RepoResult<AppPortal>;
    fn delete_app(&self, id: &str) -> RepoResult<()>;
}

/// Repository over an [`AppConfigStore`]; also implements `MemberRepository`.
pub struct LocalAppRepository<'store, S: LocalStorage> {
    pub(crate) store: &'store AppConfigStore<S>,
}

impl<'store, S: LocalStorage> LocalAppRepository<'store, S> {
    pub fn new(store: &'store AppConfigStore<S>) -> Self {
        Self { store }
    }
}

impl<S: LocalStorage> AppRepository for LocalAppRepository<'_, S> {
    fn list_apps(&self) -> Vec<AppPortal> {
        self.store.load().apps
    }

    fn get_app(&self, id: &str) -> Option<AppPortal> {
        self.store.load().find(id).cloned()
    }

    fn create_app(&self, app: NewApp) -> RepoResult<AppPortal> {
        let created = app.into_portal(new_record_id(), timestamp::now());
        reject_duplicate_emails(&created.id, &created.users)?;
        let mut collection = self.store.load();
        collection.apps.push(created.clone());
        self.store.save(&collection);

        info!(
            "event=app_create module=repo status=ok app_id={} members={}",
            created.id,
            created.users.len()
        );
        Ok(created)
    }

    fn update_app(&self, id: &str, patch: &AppPatch) -> RepoResult<AppPortal> {
        let mut collection = self.store.load();
        let app = collection
            .find_mut(id)
            .ok_or_else(|| RepoError::app_not_found(id))?;
        if let Some(users) = &patch.users {
            reject_duplicate_emails(id, users)?;
        }
        patch.apply_to(app);
        app.touch();
        let updated = app.clone();
        self.store.save(&collection);

        info!("event=app_update module=repo status=ok app_id={id}");
        Ok(updated)
    }

    fn delete_app(&self, id: &str) -> RepoResult<()> {
        let mut collection = self.store.load();
        let before = collection.apps.len();
        collection.apps.retain(|app| app.id != id);
        if collection.apps.len() == before {
            return Err(RepoError::app_not_found(id));
        }
        self.store.save(&collection);

        info!("event=app_delete module=repo status=ok app_id={id}");
        Ok(())
    }
}
