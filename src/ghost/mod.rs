//! Ghost Admin API access

pub mod client;
pub mod endpoint;
pub mod types;

pub use client::GhostClient;
pub use endpoint::Endpoint;
