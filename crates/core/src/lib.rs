//! Domain logic for the AskCharlie backend.
//!
//! This crate has no internal dependencies so it can be used by the
//! repository layer, the API server, and any future CLI tooling.

pub mod chat;
pub mod error;
pub mod prompt;
pub mod retrieval;
pub mod roles;
pub mod roundtable;
pub mod tiers;
pub mod types;
