//! Athlete roster domain model.
//!
//! # Responsibility
//! - Define the persisted athlete record and its nested sub-records.
//! - Define validated input drafts used by registry mutations.
//!
//! # Invariants
//! - `career` and `finance` are always present; older snapshots get defaults.
//! - Unknown JSON fields survive a load/save round-trip untouched.

pub mod athlete;
pub mod draft;
pub mod seed;
pub mod theme;
