//! Logged-in identity and its platform-wide role.
//!
//! `Role` is independent of any per-app `Permission`.

use serde::{Deserialize, Serialize};

pub type IdentityId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: IdentityId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_temporary_password: Option<bool>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether the identity still has to replace a temporary password.
    pub fn must_reset_password(&self) -> bool {
        self.is_temporary_password.unwrap_or(false)
    }
}

/// Profile fields an identity may change about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl IdentityPatch {
    pub(crate) fn apply_to(&self, identity: &mut Identity) {
        if let Some(name) = &self.name {
            identity.name = name.clone();
        }
        if let Some(email) = &self.email {
            identity.email = email.clone();
        }
        if let Some(avatar) = &self.avatar {
            identity.avatar = Some(avatar.clone());
        }
    }
}
