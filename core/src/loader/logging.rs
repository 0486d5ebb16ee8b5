use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, warn};

use super::{LoadMode, Loader, LoaderError, LoaderState};
use crate::resource::Resource;

/// Decorator that records load outcomes without altering them.
///
/// Every lookup primitive forwards to the wrapped loader, so listener
/// and resolver registrations, delegation and notification behave as if
/// the wrapper were not there; the wrapper only observes the result of
/// `load`.
pub struct LoggingLoader {
    inner: Arc<dyn Loader>,
}

impl LoggingLoader {
    pub fn new(inner: Arc<dyn Loader>) -> Self {
        Self { inner }
    }
}

impl Loader for LoggingLoader {
    fn supports(&self, resource: &Resource) -> bool {
        self.inner.supports(resource)
    }

    fn find_resource(
        &self,
        resource: &Resource,
        mode: LoadMode,
    ) -> Result<Vec<Resource>, LoaderError> {
        self.inner.find_resource(resource, mode)
    }

    fn do_load(&self, resource: &Resource) -> Result<(), LoaderError> {
        self.inner.do_load(resource)
    }

    fn is_valid(&self, resource: &Resource, now: SystemTime) -> bool {
        self.inner.is_valid(resource, now)
    }

    fn state(&self) -> &LoaderState {
        self.inner.state()
    }

    fn load(&self, resource: &Resource, mode: LoadMode) -> Result<(), LoaderError> {
        let result = self.inner.load(resource, mode);
        match &result {
            Ok(()) => debug!(resource = %resource, "loaded resource"),
            Err(err) => warn!(resource = %resource, error = %err, "failed to load resource"),
        }
        result
    }
}
