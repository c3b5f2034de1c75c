//! Persistence layer: slot repository and the athlete snapshot store.
//!
//! # Responsibility
//! - Define the key-value slot contract and its SQLite implementation.
//! - Serialize/normalize the roster and theme into named slots.
//!
//! # Invariants
//! - Read failures degrade to seed data; write failures never abort callers.

pub mod athlete_store;
pub mod slot_repo;
