//! Domain model for teams and their projects.
//!
//! # Responsibility
//! - Define the canonical team/project shapes shared by store, query and
//!   validation layers.
//! - Keep the persisted snapshot field names stable for existing clients.
//!
//! # Invariants
//! - Every project inside `Team::projects` carries `team == Team::id`.
//! - Project ids are unique across the whole team collection.

pub mod project;
pub mod seed;
pub mod team;
