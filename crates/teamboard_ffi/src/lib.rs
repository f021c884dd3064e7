//! Flutter-facing bindings for `teamboard_core`.

pub mod api;
