//! Access resolution for app portals.
//!
//! # Responsibility
//! - Decide who may open an app portal and who may administer the dashboard.
//! - Produce the role-filtered and searched app lists shown to an identity.
//!
//! # Invariants
//! - Opening an app depends only on list membership by email.
//! - Administration depends only on the global `Role`.
//! - Per-app `Permission` levels are never consulted by a gate here.

use crate::model::app::AppPortal;
use crate::model::identity::Identity;
use crate::model::permission::Permission;

/// True iff `identity.email` is on the app's member list.
pub fn can_access(app: &AppPortal, identity: &Identity) -> bool {
    app.has_member_email(&identity.email)
}

/// True iff the identity holds the global admin role.
pub fn is_administrator(identity: &Identity) -> bool {
    identity.is_admin()
}

/// Stored per-app level of `identity`, for display only.
pub fn member_permission(app: &AppPortal, identity: &Identity) -> Option<Permission> {
    app.member_by_email(&identity.email)
        .map(|member| member.permission)
}

/// Apps listed for `identity`: all for administrators, active ones otherwise.
pub fn visible_apps<'a>(apps: &'a [AppPortal], identity: &Identity) -> Vec<&'a AppPortal> {
    let show_inactive = is_administrator(identity);
    apps.iter()
        .filter(|app| show_inactive || app.is_active)
        .collect()
}

/// Case-insensitive substring match on title or description.
///
/// A blank query matches every app.
pub fn matches_query(app: &AppPortal, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || app.title.to_lowercase().contains(&needle)
        || app.description.to_lowercase().contains(&needle)
}

pub fn search_apps<'a>(apps: &[&'a AppPortal], query: &str) -> Vec<&'a AppPortal> {
    apps.iter()
        .copied()
        .filter(|app| matches_query(app, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{can_access, is_administrator, matches_query, member_permission, visible_apps};
    use crate::model::identity::{Identity, Role};
    use crate::model::permission::Permission;
    use crate::store::app_store::AppCollection;

    fn identity(id: &str, email: &str, role: Role) -> Identity {
        Identity {
            id: id.to_string(),
            name: email.to_string(),
            email: email.to_string(),
            avatar: None,
            role,
            is_temporary_password: None,
        }
    }

    #[test]
    fn access_follows_membership_not_permission_level() {
        let apps = AppCollection::defaults().apps;
        let john = identity("9", "john@example.com", Role::User);
        let sarah = identity("8", "sarah@example.com", Role::User);

        assert!(can_access(&apps[0], &john));
        assert!(!can_access(&apps[1], &john));
        assert_eq!(member_permission(&apps[0], &john), Some(Permission::Viewer));
        assert_eq!(member_permission(&apps[1], &sarah), Some(Permission::Editor));
        assert_eq!(member_permission(&apps[0], &sarah), None);
    }

    #[test]
    fn global_admin_role_does_not_grant_app_access() {
        let apps = AppCollection::defaults().apps;
        let outsider_admin = identity("7", "root@example.com", Role::Admin);
        assert!(is_administrator(&outsider_admin));
        assert!(!can_access(&apps[0], &outsider_admin));
    }

    #[test]
    fn inactive_apps_are_hidden_from_non_admins() {
        let mut apps = AppCollection::defaults().apps;
        apps[1].is_active = false;

        let admin = identity("1", "admin@example.com", Role::Admin);
        let user = identity("2", "user@example.com", Role::User);
        assert_eq!(visible_apps(&apps, &admin).len(), 2);

        let visible = visible_apps(&apps, &user);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");
    }

    #[test]
    fn query_matches_title_or_description_case_insensitively() {
        let apps = AppCollection::defaults().apps;
        assert!(matches_query(&apps[0], "CUSTOMER"));
        assert!(matches_query(&apps[1], "employee resources"));
        assert!(matches_query(&apps[1], "  "));
        assert!(!matches_query(&apps[0], "payroll"));
    }
}
