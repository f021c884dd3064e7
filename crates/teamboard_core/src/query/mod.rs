//! Project listing: filter, paginate and track the current page.
//!
//! # Invariants
//! - Filter stages only narrow; insertion order is preserved.
//! - Page navigation outside `[1, total_pages]` is ignored.

pub mod listing;
pub mod pipeline;
