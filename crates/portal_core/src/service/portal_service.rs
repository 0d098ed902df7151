//! App portal use-case service.
//!
//! # Responsibility
//! - Provide dashboard-level entry points over the app and member repositories.
//! - Apply caller-side conventions the repositories leave open: the creator
//!   joins as admin, and the creator's membership cannot be removed.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Opening a portal requires list membership, regardless of global role.

use crate::access::{can_access, search_apps, visible_apps};
use crate::model::app::{AppMember, AppPatch, AppPortal, NewApp, NewMember};
use crate::model::identity::Identity;
use crate::model::permission::Permission;
use crate::repo::app_repo::{AppRepository, RepoError};
use crate::repo::member_repo::MemberRepository;
use crate::service::dashboard::{summarize, DashboardSummary};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalServiceError {
    /// Identity is not on the app's member list.
    AccessDenied { app_id: String },
    /// The app creator's own membership cannot be removed.
    CreatorMembership { app_id: String, member_id: String },
    Repo(RepoError),
}

impl Display for PortalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessDenied { app_id } => write!(f, "access denied to app {app_id}"),
            Self::CreatorMembership { app_id, member_id } => write!(
                f,
                "member {member_id} created app {app_id} and cannot be removed"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PortalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PortalServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Fields an admin fills in when creating a portal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalDraft {
    pub title: String,
    pub description: String,
    pub logo_url: String,
    pub url: String,
    pub is_active: bool,
}

pub struct PortalService<R> {
    repo: R,
}

impl<R: AppRepository + MemberRepository> PortalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates a portal owned by `creator`, who becomes its first admin member.
    pub fn create_portal(
        &self,
        creator: &Identity,
        draft: PortalDraft,
    ) -> Result<AppPortal, PortalServiceError> {
        let owner = AppMember {
            id: creator.id.clone(),
            name: creator.name.clone(),
            email: creator.email.clone(),
            avatar: creator.avatar.clone(),
            permission: Permission::Admin,
        };
        let app = NewApp::new(draft.title, draft.url, creator.email.clone())
            .with_description(draft.description)
            .with_logo_url(draft.logo_url)
            .with_active(draft.is_active)
            .with_users(vec![owner]);
        Ok(self.repo.create_app(app)?)
    }

    pub fn update_portal(
        &self,
        app_id: &str,
        patch: &AppPatch,
    ) -> Result<AppPortal, PortalServiceError> {
        Ok(self.repo.update_app(app_id, patch)?)
    }

    pub fn delete_portal(&self, app_id: &str) -> Result<(), PortalServiceError> {
        Ok(self.repo.delete_app(app_id)?)
    }

    /// Apps listed for `identity`, filtered by `query` on title/description.
    pub fn list_for(&self, identity: &Identity, query: &str) -> Vec<AppPortal> {
        let apps = self.repo.list_apps();
        let visible = visible_apps(&apps, identity);
        search_apps(&visible, query).into_iter().cloned().collect()
    }

    /// Loads an app for the portal view, checking list membership.
    pub fn open_portal(
        &self,
        app_id: &str,
        identity: &Identity,
    ) -> Result<AppPortal, PortalServiceError> {
        let app = self
            .repo
            .get_app(app_id)
            .ok_or_else(|| RepoError::app_not_found(app_id))?;
        if !can_access(&app, identity) {
            warn!(
                "event=portal_open module=service status=denied app_id={app_id} identity_id={}",
                identity.id
            );
            return Err(PortalServiceError::AccessDenied {
                app_id: app_id.to_string(),
            });
        }
        Ok(app)
    }

    pub fn add_member(
        &self,
        app_id: &str,
        member: NewMember,
    ) -> Result<AppPortal, PortalServiceError> {
        Ok(self.repo.add_member(app_id, member)?)
    }

    /// Removes a member unless it is the app creator's own membership.
    pub fn remove_member(
        &self,
        app_id: &str,
        member_id: &str,
    ) -> Result<AppPortal, PortalServiceError> {
        let app = self
            .repo
            .get_app(app_id)
            .ok_or_else(|| RepoError::app_not_found(app_id))?;
        if app.member(member_id).is_some_and(|member| app.is_creator(member)) {
            return Err(PortalServiceError::CreatorMembership {
                app_id: app_id.to_string(),
                member_id: member_id.to_string(),
            });
        }
        Ok(self.repo.remove_member(app_id, member_id)?)
    }

    pub fn set_permission(
        &self,
        app_id: &str,
        member_id: &str,
        permission: &str,
    ) -> Result<AppPortal, PortalServiceError> {
        Ok(self.repo.set_permission(app_id, member_id, permission)?)
    }

    pub fn dashboard(&self) -> DashboardSummary {
        summarize(&self.repo.list_apps())
    }
}
