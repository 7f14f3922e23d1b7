//! # Backoffice Domain
//!
//! Business domain types for the blog backoffice API client.
//!
//! This crate contains:
//! - Credential pair and session types
//! - Resource models (articles, books, series)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other backoffice crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
