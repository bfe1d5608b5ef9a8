//! MCP server for FoodSwap

pub mod server;

pub use server::FoodSwapService;
