// TokenDeck - app/mod.rs
//
// Application layer: state management and request orchestration.
// Dependencies: core and api layers.
// Must NOT depend on: ui, platform specifics.

pub mod state;
