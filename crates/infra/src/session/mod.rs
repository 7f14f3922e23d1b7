//! Session lifecycle on top of the gateway

pub mod service;

pub use service::SessionService;
