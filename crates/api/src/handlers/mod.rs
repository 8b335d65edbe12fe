pub mod admin;
pub mod auth;
pub mod character;
pub mod chat;
pub mod faq;
pub mod persona;
pub mod rag;
pub mod roundtable;
pub mod study;
pub mod tier;
