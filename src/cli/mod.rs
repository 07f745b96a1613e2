//! CLI command handlers

pub mod commands;

pub use commands::{convert, dump, headers, sheets, verify};
