//! Domain types and models
//!
//! Wire-facing resource models use camelCase to match the backoffice API.

pub mod article;
pub mod book;
pub mod credentials;
pub mod notification;
pub mod pagination;
pub mod serie;

pub use article::{Article, ArticleCreate, ArticleQuery, ArticleStatus, ArticleUpdate};
pub use book::{Book, BookCreate, BookQuery, BookUpdate};
pub use credentials::{CredentialPair, TokenInfo};
pub use notification::{Notification, NotificationLevel};
pub use pagination::{PaginatedResponse, SortOrder};
pub use serie::{Serie, SerieCreate, SerieList, SerieUpdate, SeriesQuery};

/// Query parameters expressed as `(name, value)` pairs in insertion order.
///
/// `None` values are dropped by the request builder rather than encoded.
pub type QueryPairs = Vec<(&'static str, Option<String>)>;
