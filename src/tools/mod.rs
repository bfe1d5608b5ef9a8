//! MCP tool implementations

pub mod account;
pub mod body;
pub mod foods;
pub mod status;

pub use status::{StatusTracker, USAGE_INSTRUCTIONS};
