//! Pure derivations recomputed from roster state on demand.
//!
//! # Responsibility
//! - Rank athletes by points and compute relative percent bars.
//! - Summarize injuries, performance, support, completion and demographics.
//!
//! # Invariants
//! - No function here mutates its input.

pub mod currency;
pub mod ranking;
pub mod summary;
