//! Shared types for the restaurant site
//!
//! Data models, the API response envelope, and small utilities used by
//! the site server and its tests.

pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
