//! Form validation for project drafts.
//!
//! # Responsibility
//! - Turn a draft into a field-keyed error map without touching state.
//!
//! # Invariants
//! - Every rule runs; violations are collected, never short-circuited.
//! - An empty map means the draft may be committed.

pub mod project_form;
