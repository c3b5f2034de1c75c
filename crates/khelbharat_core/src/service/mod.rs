//! Core use-case services.
//!
//! # Responsibility
//! - Own roster state and orchestrate validated mutations plus persistence.
//! - Project roster state into role-scoped dashboard view models.

pub mod dashboard;
pub mod registry;
