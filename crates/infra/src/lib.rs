//! # Backoffice Infrastructure
//!
//! Infrastructure implementations of the core ports plus the HTTP gateway.
//!
//! This crate contains:
//! - The authenticated HTTP gateway (reqwest) with refresh, retry, timeout
//! - Typed clients for articles, books, and series
//! - Session service (login, register, logout, token inspection)
//! - File-backed key/value storage
//! - Notifiers and the channel navigator
//! - Configuration loading and logging setup
//!
//! ## Architecture
//! - Implements traits defined in `backoffice-core`
//! - Contains all "impure" code (network, filesystem)

pub mod api;
pub mod config;
pub mod http;
pub mod navigation;
pub mod notify;
pub mod observability;
pub mod session;
pub mod storage;

// Re-export commonly used items
pub use api::{ArticlesApi, BooksApi, SeriesApi};
pub use http::{GatewayError, GatewayResult, HttpGateway, HttpGatewayBuilder, RequestOptions};
pub use navigation::ChannelNavigator;
pub use notify::{NotificationCenter, TracingNotifier};
pub use session::SessionService;
pub use storage::FileStorage;
