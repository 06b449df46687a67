pub mod resolve_query;

pub use resolve_query::{ResolutionMode, ResolveQueryUseCase, ResolverSettings};
