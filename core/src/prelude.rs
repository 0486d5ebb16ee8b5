//! Convenience re-exports of the commonly used types.

pub use crate::error::Error;
pub use crate::loader::builtins::{FileLoader, InMemoryLoader, LoadedFile};
pub use crate::loader::logging::LoggingLoader;
pub use crate::loader::resolver::{LoaderResolver, Resolver, ResolverError};
pub use crate::loader::{Listener, LoadMode, Loader, LoaderError, LoaderState};
pub use crate::resource::Resource;
