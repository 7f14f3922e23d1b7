//! Ports towards the user-facing front end.

pub mod ports;
