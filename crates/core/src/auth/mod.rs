//! Credential handling: storage ports, blob codec, response normalization,
//! and token inspection.

pub mod codec;
pub mod jwt;
pub mod memory;
pub mod normalize;
pub mod ports;
pub mod store;
