//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into dashboard-level APIs.
//! - Keep callers decoupled from storage details.

pub mod dashboard;
pub mod portal_service;
