//! pod-dns Infrastructure Layer
//!
//! Wire codec, transports and nameserver clients built on hickory-proto,
//! the hickory-server request handler, and system discovery.
pub mod dns;
pub mod system;
