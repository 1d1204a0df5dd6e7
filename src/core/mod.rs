// TokenDeck - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library plus serde/chrono data derives only.
// Must NOT depend on: ui, platform, api, or any I/O crate directly.

pub mod model;
pub mod pager;
