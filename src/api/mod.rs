//! Sheetfix API Server module
//!
//! HTTP API over a single in-memory table.
//! Run with `sheetfix-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server, ApiConfig, AppState};
