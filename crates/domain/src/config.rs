//! Configuration module for pod-dns
//!
//! - `root`: Main configuration and CLI overrides
//! - `server`: Listener binding
//! - `resolver`: Resolution mode, namespace, timeouts
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
