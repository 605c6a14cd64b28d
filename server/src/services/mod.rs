// server/src/services/mod.rs

//! Business operations behind the HTTP handlers. Each function is one
//! synchronous request/response worth of work against the database.

pub mod catalog;
pub mod orders;
pub mod seed;
