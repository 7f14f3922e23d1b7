//! Typed clients for the backoffice resources
//!
//! Each client is a thin layer over [`HttpGateway`](crate::http::HttpGateway):
//! it owns the resource path and the request/response types, nothing else.

pub mod articles;
pub mod books;
pub mod series;

pub use articles::ArticlesApi;
pub use books::BooksApi;
pub use series::SeriesApi;
