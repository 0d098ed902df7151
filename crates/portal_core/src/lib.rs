//! Core domain logic for the App Portal dashboard.
//! This crate is the single source of truth for data-access and access rules.

pub mod access;
pub mod auth;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod store;

pub use access::{can_access, is_administrator, member_permission, search_apps, visible_apps};
pub use auth::credentials::{authenticate, known_identity_ids};
pub use auth::session::SessionStore;
pub use auth::{AuthError, AuthResult};
pub use config::PortalConfig;
pub use logging::{default_log_level, init_logging, init_logging_from, logging_status};
pub use model::app::{AppId, AppMember, AppPatch, AppPortal, MemberId, NewApp, NewMember};
pub use model::identity::{Identity, IdentityPatch, Role};
pub use model::notification::{NewNotification, Notification};
pub use model::permission::Permission;
pub use repo::app_repo::{AppRepository, EntityKind, LocalAppRepository, RepoError, RepoResult};
pub use repo::member_repo::MemberRepository;
pub use service::dashboard::{summarize, DashboardSummary};
pub use service::portal_service::{PortalDraft, PortalService, PortalServiceError};
pub use storage::{LocalStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};
pub use store::app_store::{AppCollection, AppConfigStore};
pub use store::mirror::{LogOnlyMirror, MirrorHook};
pub use store::notification_store::NotificationStore;
pub use store::preferences::PreferencesStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
