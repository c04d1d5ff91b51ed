//! HTTP handlers for the server.

pub mod print;
pub mod status;
