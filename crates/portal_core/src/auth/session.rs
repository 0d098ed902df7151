//! Logged-in identity persisted under the `user` key.

use crate::auth::credentials::authenticate;
use crate::auth::{AuthError, AuthResult};
use crate::model::identity::{Identity, IdentityPatch};
use crate::storage::{keys, read_json, write_json, LocalStorage};
use log::{error, info, warn};

pub struct SessionStore<S: LocalStorage> {
    storage: S,
}

impl<S: LocalStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Authenticates and persists the resulting identity.
    pub fn login(&self, email: &str, password: &str) -> AuthResult<Identity> {
        let Some(identity) = authenticate(email, password) else {
            warn!("event=auth_login module=auth status=denied error_code=invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        };

        self.persist(&identity);
        info!(
            "event=auth_login module=auth status=ok identity_id={} temporary_password={}",
            identity.id,
            identity.must_reset_password()
        );
        Ok(identity)
    }

    pub fn logout(&self) {
        if let Err(err) = self.storage.remove_item(keys::USER) {
            error!("event=auth_logout module=auth status=error error={err}");
            return;
        }
        info!("event=auth_logout module=auth status=ok");
    }

    /// The stored identity, if any.
    pub fn current(&self) -> Option<Identity> {
        read_json::<Identity>(&self.storage, keys::USER).unwrap_or_else(|err| {
            error!(
                "event=auth_session_load module=auth status=logged_out error_code=malformed_storage error={err}"
            );
            None
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// Whether the logged-in identity has the global admin role.
    pub fn is_admin(&self) -> bool {
        self.current().is_some_and(|identity| identity.is_admin())
    }

    /// Replaces the password and clears the temporary-password flag.
    ///
    /// `current_password` is not verified; there is no password store to check it against.
    pub fn update_password(
        &self,
        _current_password: &str,
        new_password: &str,
    ) -> AuthResult<Identity> {
        let mut identity = self.current().ok_or(AuthError::NoSession)?;
        if new_password.trim().is_empty() {
            return Err(AuthError::InvalidPassword("new password must not be empty"));
        }

        identity.is_temporary_password = Some(false);
        self.persist(&identity);
        info!(
            "event=auth_password_update module=auth status=ok identity_id={}",
            identity.id
        );
        Ok(identity)
    }

    /// Merges profile fields into the stored identity.
    pub fn update_profile(&self, patch: &IdentityPatch) -> AuthResult<Identity> {
        let mut identity = self.current().ok_or(AuthError::NoSession)?;
        patch.apply_to(&mut identity);
        self.persist(&identity);
        info!(
            "event=auth_profile_update module=auth status=ok identity_id={}",
            identity.id
        );
        Ok(identity)
    }

    fn persist(&self, identity: &Identity) {
        if let Err(err) = write_json(&self.storage, keys::USER, identity) {
            error!(
                "event=auth_session_save module=auth status=error identity_id={} error={err}",
                identity.id
            );
        }
    }
}
