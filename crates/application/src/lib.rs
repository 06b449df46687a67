//! pod-dns Application Layer
//!
//! Ports to the outside world and the resolution policy built on them.
pub mod ports;
pub mod services;
pub mod use_cases;
