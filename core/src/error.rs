use crate::loader::{resolver::ResolverError, LoaderError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Loader error")]
    Loader(#[from] LoaderError),
    #[error("Resolver error")]
    Resolver(#[from] ResolverError),
}
