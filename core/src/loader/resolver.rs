use std::sync::Arc;

use thiserror::Error;

use super::Loader;
use crate::resource::Resource;

#[derive(Debug, Error)]
pub enum ResolverError {
    /// No registered loader supports the resource.
    #[error("no registered loader supports `{0}`")]
    NoMatch(Resource),
    #[error("resolver error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Finds a capable [`Loader`] for resources the asking loader cannot
/// handle itself.
pub trait Resolver: Send + Sync {
    fn resolve(&self, resource: &Resource) -> Result<Arc<dyn Loader>, ResolverError>;
}

/// An ordered loader registry resolving to the first registered loader
/// that supports the resource.
#[derive(Default)]
pub struct LoaderResolver {
    loaders: Vec<Arc<dyn Loader>>,
}

impl LoaderResolver {
    pub fn new(loaders: Vec<Arc<dyn Loader>>) -> Self {
        Self { loaders }
    }

    /// Appends a loader to the registry. Earlier loaders win ties.
    pub fn push(&mut self, loader: Arc<dyn Loader>) {
        self.loaders.push(loader);
    }

    pub fn loaders(&self) -> &[Arc<dyn Loader>] {
        &self.loaders
    }
}

impl Resolver for LoaderResolver {
    fn resolve(&self, resource: &Resource) -> Result<Arc<dyn Loader>, ResolverError> {
        self.loaders
            .iter()
            .find(|loader| loader.supports(resource))
            .cloned()
            .ok_or_else(|| ResolverError::NoMatch(resource.clone()))
    }
}
