//! HTTP gateway to the backoffice API

pub mod errors;
pub mod gateway;
pub mod options;

pub use errors::{GatewayError, GatewayResult};
pub use gateway::{HttpGateway, HttpGatewayBuilder};
pub use options::RequestOptions;
