// handlers/mod.rs - HTTP handlers
//
// Public routes (root, health) need no token. Everything under /api/* runs
// behind the profile resolver and scopes its data to the caller.

pub mod agenda;
pub mod auth;
pub mod health;

pub use health::{health, root};
