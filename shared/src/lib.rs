//! Shared types for the Saltbee ordering client
//!
//! Domain models, wire DTOs, and utility helpers used across the
//! workspace crates.

pub mod client;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
