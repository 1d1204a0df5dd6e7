// TokenDeck - platform/mod.rs
//
// Platform integration: config directory resolution and config.toml.

pub mod config;
