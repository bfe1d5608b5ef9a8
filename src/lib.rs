//! FoodSwap Library
//!
//! Food lookup, healthier alternatives and weight impact projections.

pub mod alternatives;
pub mod build_info;
pub mod config;
pub mod mcp;
pub mod metabolic;
pub mod models;
pub mod nutrition;
pub mod session;
pub mod source;
pub mod tools;
