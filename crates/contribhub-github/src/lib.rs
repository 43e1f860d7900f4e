pub mod client;
pub mod queries;
pub mod source;
pub mod error;

// Re-exports
pub use client::{ClientConfig, GitHubClient, DEFAULT_API_URL};
pub use error::{Error, Result};
