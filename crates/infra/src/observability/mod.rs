//! Logging setup
//!
//! Library code only emits `tracing` events; binaries and tests call
//! [`init_tracing`] once to install a subscriber.

pub mod logging;

pub use logging::{init_tracing, try_init_tracing};
