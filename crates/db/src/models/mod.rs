//! Entity models and DTOs, one module per table.

pub mod character;
pub mod faq;
pub mod persona;
pub mod role;
pub mod roundtable_settings;
pub mod session;
pub mod study;
pub mod tier_settings;
pub mod transcript_chunk;
pub mod user;
