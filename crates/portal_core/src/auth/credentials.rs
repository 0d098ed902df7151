//! Built-in demo accounts.

use crate::model::identity::{Identity, IdentityId, Role};

struct Credential {
    email: &'static str,
    password: &'static str,
    id: &'static str,
    name: &'static str,
    avatar: Option<&'static str>,
    role: Role,
    temporary_password: bool,
}

const CREDENTIALS: &[Credential] = &[
    Credential {
        email: "admin@example.com",
        password: "password",
        id: "1",
        name: "Admin User",
        avatar: Some("/placeholder.svg"),
        role: Role::Admin,
        temporary_password: false,
    },
    Credential {
        email: "user@example.com",
        password: "password",
        id: "2",
        name: "Regular User",
        avatar: None,
        role: Role::User,
        temporary_password: false,
    },
    Credential {
        email: "newuser@example.com",
        password: "temp123",
        id: "3",
        name: "New User",
        avatar: None,
        role: Role::User,
        temporary_password: true,
    },
];

impl Credential {
    fn identity(&self) -> Identity {
        Identity {
            id: self.id.to_string(),
            name: self.name.to_string(),
            email: self.email.to_string(),
            avatar: self.avatar.map(str::to_string),
            role: self.role,
            is_temporary_password: self.temporary_password.then_some(true),
        }
    }
}

/// Returns the identity bound to an exact email/password pair.
pub fn authenticate(email: &str, password: &str) -> Option<Identity> {
    CREDENTIALS
        .iter()
        .find(|entry| entry.email == email && entry.password == password)
        .map(Credential::identity)
}

/// Ids of every built-in account, used as the broadcast recipient list.
pub fn known_identity_ids() -> Vec<IdentityId> {
    CREDENTIALS.iter().map(|entry| entry.id.to_string()).collect()
}
