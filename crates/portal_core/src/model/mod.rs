//! Domain models persisted in local storage.
//!
//! # Responsibility
//! - Define the JSON shapes shared with the browser dashboard.
//! - Keep boundary coercion (permissions, timestamps) inside deserialization.

pub mod app;
pub mod identity;
pub mod notification;
pub mod permission;
pub mod timestamp;
