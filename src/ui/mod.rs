// TokenDeck - ui/mod.rs
//
// UI layer: panels and theme. Renders state, stages requests.
// Dependencies: app, core layers.
// Must NOT depend on: api client internals, platform specifics.

pub mod panels;
pub mod theme;
