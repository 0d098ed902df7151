//! Local session handling over a fixed credential table.
//!
//! # Responsibility
//! - Resolve login attempts against the built-in accounts.
//! - Persist the logged-in identity under the `user` key.
//!
//! # Invariants
//! - Passwords are compared in memory only and never logged or stored.
//! - A malformed stored identity reads as "logged out".

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod credentials;
pub mod session;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
    /// Operation needs a logged-in identity.
    NoSession,
    InvalidPassword(&'static str),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => f.write_str("invalid credentials"),
            Self::NoSession => f.write_str("no active session"),
            Self::InvalidPassword(reason) => write!(f, "invalid password: {reason}"),
        }
    }
}

impl Error for AuthError {}
