//! Persisted stores over local storage.
//!
//! # Responsibility
//! - Own the load/save cycle of each storage key.
//! - Absorb storage failures: reads degrade to defaults, writes are logged.
//!
//! # Invariants
//! - Every write replaces the whole blob of its key.
//! - No store keeps a cache; each call reads storage afresh.

pub mod app_store;
pub mod mirror;
pub mod notification_store;
pub mod preferences;

use uuid::Uuid;

/// Collision-resistant id for new records.
pub(crate) fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}
