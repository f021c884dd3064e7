//! Application state for teams, projects and the team selection.
//!
//! # Responsibility
//! - Own the canonical team collection and selected team id.
//! - Apply project mutations and persist after each one.
//!
//! # Invariants
//! - The selected team is recomputed on read, never cached.
//! - Mutations either fully apply or leave state untouched.

pub mod team_store;
