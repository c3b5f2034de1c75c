//! Roster filter predicates.
//!
//! # Invariants
//! - Filters never reorder their input; they only drop non-matching entries.
//! - Empty text filters match every athlete.

pub mod filter;
