//! Member-in-app repository contract.
//!
//! # Invariants
//! - A member email appears at most once per app.
//! - Permissions are coerced before they are stored.
//! - Successful writes refresh the owning app's `updated_at`; failed ones
//!   leave storage untouched.

use crate::model::app::{AppPortal, NewMember};
use crate::model::permission::Permission;
use crate::repo::app_repo::{EntityKind, LocalAppRepository, RepoError, RepoResult};
use crate::storage::LocalStorage;
use crate::store::new_record_id;
use log::{info, warn};

/// CRUD contract for the member list nested in an app.
pub trait MemberRepository {
    /// Appends a member; `Conflict` when the email is already present.
    fn add_member(&self, app_id: &str, member: NewMember) -> RepoResult<AppPortal>;
    /// Removes a member; an unknown member id is not an error.
    fn remove_member(&self, app_id: &str, member_id: &str) -> RepoResult<AppPortal>;
    /// Replaces a member's permission with the coerced `permission`.
    fn set_permission(
        &self,
        app_id: &str,
        member_id: &str,
        permission: &str,
    ) -> RepoResult<AppPortal>;
}

impl<S: LocalStorage> MemberRepository for LocalAppRepository<'_, S> {
    fn add_member(&self, app_id: &str, member: NewMember) -> RepoResult<AppPortal> {
        let mut collection = self.store.load();
        let app = collection
            .find_mut(app_id)
            .ok_or_else(|| RepoError::app_not_found(app_id))?;

        if app.has_member_email(&member.email) {
            warn!("event=member_add module=repo status=conflict app_id={app_id}");
            return Err(RepoError::Conflict {
                app_id: app_id.to_string(),
                email: member.email,
            });
        }

        let member = member.into_member(new_record_id());
        info!(
            "event=member_add module=repo status=ok app_id={app_id} member_id={} permission={}",
            member.id, member.permission
        );
        app.users.push(member);
        app.touch();
        let updated = app.clone();
        self.store.save(&collection);
        Ok(updated)
    }

    fn remove_member(&self, app_id: &str, member_id: &str) -> RepoResult<AppPortal> {
        let mut collection = self.store.load();
        let app = collection
            .find_mut(app_id)
            .ok_or_else(|| RepoError::app_not_found(app_id))?;

        let before = app.users.len();
        app.users.retain(|member| member.id != member_id);
        app.touch();
        let updated = app.clone();
        self.store.save(&collection);

        info!(
            "event=member_remove module=repo status=ok app_id={app_id} member_id={member_id} removed={}",
            before - updated.users.len()
        );
        Ok(updated)
    }

    fn set_permission(
        &self,
        app_id: &str,
        member_id: &str,
        permission: &str,
    ) -> RepoResult<AppPortal> {
        let mut collection = self.store.load();
        let app = collection
            .find_mut(app_id)
            .ok_or_else(|| RepoError::app_not_found(app_id))?;
        let member = app
            .users
            .iter_mut()
            .find(|member| member.id == member_id)
            .ok_or_else(|| RepoError::NotFound {
                kind: EntityKind::Member,
                id: member_id.to_string(),
            })?;

        member.permission = Permission::coerce(permission);
        info!(
            "event=member_permission module=repo status=ok app_id={app_id} member_id={member_id} permission={}",
            member.permission
        );
        app.touch();
        let updated = app.clone();
        self.store.save(&collection);
        Ok(updated)
    }
}
