//! Per-app permission level and its coercion policy.
//!
//! # Invariants
//! - Only `admin`, `editor` and `viewer` are representable.
//! - Any other input, from storage or callers, becomes `Viewer`.
//! - Coercion never fails.

use crate::logging::sanitize_message;
use log::warn;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const MAX_LOGGED_RAW_CHARS: usize = 32;

/// Access level of one member inside one app portal.
///
/// Stored and displayed, but not consulted by any access gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Admin,
    Editor,
    #[default]
    Viewer,
}

impl Permission {
    /// Maps untrusted input onto the closed set, downgrading unknown values to `Viewer`.
    pub fn coerce(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            warn!(
                "event=permission_coerced module=model status=fallback raw={} coerced=viewer",
                sanitize_message(raw, MAX_LOGGED_RAW_CHARS)
            );
            Self::Viewer
        })
    }

    /// Strict parse; `None` for anything outside the closed set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self::coerce(value)
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PermissionVisitor)
    }
}

struct PermissionVisitor;

// Every JSON shape is accepted; non-strings take the same fallback as unknown strings.
impl<'de> Visitor<'de> for PermissionVisitor {
    type Value = Permission;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a permission string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Permission, E> {
        Ok(Permission::coerce(value))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Permission, E> {
        Ok(Permission::coerce(&value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Permission, E> {
        Ok(Permission::coerce(&value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Permission, E> {
        Ok(Permission::coerce(&value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Permission, E> {
        Ok(Permission::coerce(&value.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Permission, E> {
        Ok(Permission::coerce("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<Permission, E> {
        Ok(Permission::coerce("null"))
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Permission, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(Permission::coerce("[array]"))
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Permission, A::Error> {
        while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
        Ok(Permission::coerce("{object}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Permission;

    #[test]
    fn coerce_keeps_known_levels() {
        assert_eq!(Permission::coerce("admin"), Permission::Admin);
        assert_eq!(Permission::coerce("editor"), Permission::Editor);
        assert_eq!(Permission::coerce("viewer"), Permission::Viewer);
    }

    #[test]
    fn coerce_downgrades_unknown_values() {
        assert_eq!(Permission::coerce("bogus"), Permission::Viewer);
        assert_eq!(Permission::coerce("Admin"), Permission::Viewer);
        assert_eq!(Permission::coerce(" admin"), Permission::Viewer);
        assert_eq!(Permission::coerce(""), Permission::Viewer);
    }

    #[test]
    fn deserialize_runs_coercion() {
        let levels: Vec<Permission> =
            serde_json::from_str(r#"["admin", "owner", 7, null, {"a": 1}, "editor"]"#).unwrap();
        assert_eq!(
            levels,
            vec![
                Permission::Admin,
                Permission::Viewer,
                Permission::Viewer,
                Permission::Viewer,
                Permission::Viewer,
                Permission::Editor,
            ]
        );
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Permission::Editor).unwrap(),
            "\"editor\""
        );
        assert_eq!(Permission::Admin.to_string(), "admin");
    }
}
