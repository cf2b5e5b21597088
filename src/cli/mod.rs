//! CLI command handlers

pub mod commands;

pub use commands::{columns, replace, report};
