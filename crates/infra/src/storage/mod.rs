//! Key/value storage backends
//!
//! [`MemoryStorage`](backoffice_core::MemoryStorage) lives in core; the
//! backends here touch the filesystem.

pub mod file;

pub use file::FileStorage;
