// TokenDeck - api/mod.rs
//
// Backend API layer: the blocking HTTP client and the background
// worker that keeps network calls off the UI thread.

pub mod client;
pub mod worker;
