pub mod host_resolver;
pub mod namespace;
pub mod resolv_conf;

pub use host_resolver::SystemHostResolver;
pub use namespace::{discover_namespace, NamespaceSources};
pub use resolv_conf::ResolvConf;
