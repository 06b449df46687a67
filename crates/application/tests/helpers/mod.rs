pub mod mock_resolvers;

#[allow(unused_imports)]
pub use mock_resolvers::*;
