//! Persistence adapters for the team snapshot.
//!
//! # Responsibility
//! - Define the load/save contract the state store persists through.
//! - Keep key/value and JSON details out of the store.
//!
//! # Invariants
//! - Loads fail soft: absent or unreadable entries come back as `None`.
//! - Saves write whole values; there are no partial updates.

pub mod snapshot_repo;
