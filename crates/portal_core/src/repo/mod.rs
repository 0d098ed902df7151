//! Repository layer over the persisted app collection.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for apps and members.
//! - Keep load/save mechanics inside the store layer.
//!
//! # Invariants
//! - Missing targets and duplicates are returned as `RepoError`, never panics.
//! - Storage transport failures are absorbed by the store, not surfaced here.

pub mod app_repo;
pub mod member_repo;
