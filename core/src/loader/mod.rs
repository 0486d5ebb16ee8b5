//! The load/import/resolve protocol.
//!
//! A [`Loader`] turns a [`Resource`] into a loaded artifact and notifies
//! its listeners afterwards. Requests for resources a loader cannot
//! handle are forwarded to a [`Resolver`](resolver::Resolver), which
//! hands back a capable loader to delegate to.

pub mod builtins;
pub mod logging;
pub mod resolver;
mod state;

use std::sync::Arc;
use std::time::SystemTime;

use thiserror::Error;

use self::resolver::{Resolver, ResolverError};
pub use self::state::LoaderState;
use crate::resource::Resource;

/// How many concrete items a single load request may produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Load the first matching item only.
    #[default]
    One,
    /// Load every item the lookup yields.
    All,
}

#[derive(Debug, Error)]
pub enum LoaderError {
    /// No loader was able to handle the resource: either no resolver was
    /// configured, or resolution itself failed (carried as the source).
    #[error("no loader found for resource `{resource}`")]
    NoLoaderFound {
        resource: Resource,
        #[source]
        source: Option<ResolverError>,
    },
    #[error("resource `{resource}` could not be located")]
    NotFound { resource: Resource },
    #[error("failed to read resource `{resource}`")]
    Io {
        resource: Resource,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid glob pattern")]
    InvalidPattern(#[from] glob::PatternError),
    #[error("loader error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl LoaderError {
    pub(crate) fn no_loader(resource: Resource) -> Self {
        Self::NoLoaderFound {
            resource,
            source: None,
        }
    }

    pub(crate) fn unresolved(resource: Resource, source: ResolverError) -> Self {
        Self::NoLoaderFound {
            resource,
            source: Some(source),
        }
    }

    /// Wraps an arbitrary failure from a custom loader.
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Box::new(err))
    }
}

/// Observer invoked after a resource has been loaded.
pub trait Listener: Send + Sync {
    fn on_loaded(&self, resource: &Resource);
}

/// A component that turns a [`Resource`] into a loaded artifact and
/// notifies listeners.
///
/// Concrete loaders implement the lookup primitives — [`supports`],
/// [`find_resource`], [`do_load`], [`is_valid`] — and hand out their
/// [`LoaderState`]. The provided methods implement the load/import
/// protocol on top of those primitives and are not meant to be
/// overridden, except by decorators that forward to an inner loader.
///
/// [`supports`]: Loader::supports
/// [`find_resource`]: Loader::find_resource
/// [`do_load`]: Loader::do_load
/// [`is_valid`]: Loader::is_valid
pub trait Loader: Send + Sync {
    /// Returns `true` if this loader can handle `resource` directly.
    /// Must be a pure check, free of side effects.
    fn supports(&self, resource: &Resource) -> bool;

    /// Resolves a request to the concrete items to load: exactly one
    /// under [`LoadMode::One`], possibly many under [`LoadMode::All`].
    /// Every returned item must exist and be addressable by
    /// [`Loader::do_load`].
    fn find_resource(
        &self,
        resource: &Resource,
        mode: LoadMode,
    ) -> Result<Vec<Resource>, LoaderError>;

    /// Loads one item previously yielded by [`Loader::find_resource`].
    fn do_load(&self, resource: &Resource) -> Result<(), LoaderError>;

    /// Returns `true` if an artifact of `resource` produced at time
    /// `now` would still be fresh. Never triggers a load.
    fn is_valid(&self, resource: &Resource, now: SystemTime) -> bool;

    /// Listener and resolver registrations of this loader.
    fn state(&self) -> &LoaderState;

    /// Loads `resource`, notifying every registered listener once per
    /// loaded item, in registration order.
    ///
    /// Failure is not transactional: when a later item fails, earlier
    /// items stay loaded and their notifications stand.
    fn load(&self, resource: &Resource, mode: LoadMode) -> Result<(), LoaderError> {
        for found in self.find_resource(resource, mode)? {
            self.do_load(&found)?;
            self.state().notify(&found);
        }
        Ok(())
    }

    /// Loads `resource` on this loader if supported, otherwise asks the
    /// configured resolver for a capable loader and delegates to it.
    ///
    /// Notification is owned by whichever loader performs the load: a
    /// loader stays silent for resources it hands off to a delegate.
    fn import(&self, resource: &Resource) -> Result<(), LoaderError> {
        if self.supports(resource) {
            return self.load(resource, LoadMode::One);
        }

        let Some(resolver) = self.state().resolver() else {
            return Err(LoaderError::no_loader(resource.clone()));
        };

        let loader = resolver
            .resolve(resource)
            .map_err(|err| LoaderError::unresolved(resource.clone(), err))?;

        loader.load(resource, LoadMode::One)
    }

    /// Registers `listener`. Adding the same listener twice is a no-op.
    fn add_listener(&self, listener: Arc<dyn Listener>) {
        self.state().add_listener(listener);
    }

    /// Removes `listener`. Removing an unregistered listener is a no-op.
    fn remove_listener(&self, listener: &Arc<dyn Listener>) {
        self.state().remove_listener(listener);
    }

    /// Sets the resolver consulted for unsupported resources, replacing
    /// any previously set one.
    fn set_resolver(&self, resolver: Arc<dyn Resolver>) {
        self.state().set_resolver(resolver);
    }

    /// The currently configured resolver, if any.
    fn resolver(&self) -> Option<Arc<dyn Resolver>> {
        self.state().resolver()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::SystemTime;

    use super::resolver::LoaderResolver;
    use super::*;

    #[derive(Default)]
    struct RecordingListener {
        seen: Mutex<Vec<Resource>>,
    }

    impl RecordingListener {
        fn seen(&self) -> Vec<Resource> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Listener for RecordingListener {
        fn on_loaded(&self, resource: &Resource) {
            self.seen.lock().unwrap().push(resource.clone());
        }
    }

    /// Tags notifications into a shared log, for ordering assertions.
    struct TaggedListener {
        tag: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Listener for TaggedListener {
        fn on_loaded(&self, _resource: &Resource) {
            self.log.lock().unwrap().push(self.tag);
        }
    }

    /// Loader over a fixed set of names, optionally failing one of them.
    #[derive(Default)]
    struct StaticLoader {
        entries: Vec<&'static str>,
        fail_on: Option<&'static str>,
        loads: Mutex<Vec<Resource>>,
        state: LoaderState,
    }

    impl StaticLoader {
        fn new(entries: Vec<&'static str>) -> Self {
            Self {
                entries,
                ..Default::default()
            }
        }

        fn loads(&self) -> Vec<Resource> {
            self.loads.lock().unwrap().clone()
        }
    }

    impl Loader for StaticLoader {
        fn supports(&self, resource: &Resource) -> bool {
            self.entries.contains(&resource.name())
        }

        fn find_resource(
            &self,
            resource: &Resource,
            mode: LoadMode,
        ) -> Result<Vec<Resource>, LoaderError> {
            match mode {
                LoadMode::One if self.supports(resource) => Ok(vec![resource.clone()]),
                LoadMode::One => Err(LoaderError::NotFound {
                    resource: resource.clone(),
                }),
                LoadMode::All => Ok(self.entries.iter().map(|name| Resource::new(*name)).collect()),
            }
        }

        fn do_load(&self, resource: &Resource) -> Result<(), LoaderError> {
            if self.fail_on == Some(resource.name()) {
                return Err(LoaderError::Io {
                    resource: resource.clone(),
                    source: std::io::Error::other("scripted failure"),
                });
            }
            self.loads.lock().unwrap().push(resource.clone());
            Ok(())
        }

        fn is_valid(&self, resource: &Resource, _now: SystemTime) -> bool {
            self.supports(resource)
        }

        fn state(&self) -> &LoaderState {
            &self.state
        }
    }

    #[test]
    fn test_import_loads_supported_resource_locally() {
        let loader = StaticLoader::new(vec!["tpl:footer"]);
        let listener = Arc::new(RecordingListener::default());
        loader.add_listener(listener.clone());

        loader.import(&"tpl:footer".into()).unwrap();

        assert_eq!(loader.loads(), vec![Resource::new("tpl:footer")]);
        assert_eq!(listener.seen(), vec![Resource::new("tpl:footer")]);
    }

    #[test]
    fn test_import_matches_direct_load() {
        let imported = StaticLoader::new(vec!["tpl:footer"]);
        let il = Arc::new(RecordingListener::default());
        imported.add_listener(il.clone());
        imported.import(&"tpl:footer".into()).unwrap();

        let direct = StaticLoader::new(vec!["tpl:footer"]);
        let dl = Arc::new(RecordingListener::default());
        direct.add_listener(dl.clone());
        direct.load(&"tpl:footer".into(), LoadMode::One).unwrap();

        assert_eq!(imported.loads(), direct.loads());
        assert_eq!(il.seen(), dl.seen());
    }

    #[test]
    fn test_listeners_notified_in_registration_order() {
        let loader = StaticLoader::new(vec!["tpl:footer"]);
        let log = Arc::new(Mutex::new(Vec::new()));
        loader.add_listener(Arc::new(TaggedListener {
            tag: "first",
            log: log.clone(),
        }));
        loader.add_listener(Arc::new(TaggedListener {
            tag: "second",
            log: log.clone(),
        }));

        loader.import(&"tpl:footer".into()).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_import_without_resolver_fails() {
        let loader = StaticLoader::new(vec![]);
        let listener = Arc::new(RecordingListener::default());
        loader.add_listener(listener.clone());

        let err = loader.import(&"tpl:missing".into()).unwrap_err();

        match err {
            LoaderError::NoLoaderFound { resource, source } => {
                assert_eq!(resource, Resource::new("tpl:missing"));
                assert!(source.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(loader.loads().is_empty());
        assert!(listener.seen().is_empty());
    }

    #[test]
    fn test_import_delegates_to_resolved_loader() {
        let front = Arc::new(StaticLoader::new(vec!["conf:app"]));
        let delegate = Arc::new(StaticLoader::new(vec!["tpl:header"]));

        let front_listener = Arc::new(RecordingListener::default());
        front.add_listener(front_listener.clone());
        let delegate_listener = Arc::new(RecordingListener::default());
        delegate.add_listener(delegate_listener.clone());

        front.set_resolver(Arc::new(LoaderResolver::new(vec![
            delegate.clone() as Arc<dyn Loader>
        ])));

        front.import(&"tpl:header".into()).unwrap();

        assert_eq!(delegate.loads(), vec![Resource::new("tpl:header")]);
        assert_eq!(delegate_listener.seen(), vec![Resource::new("tpl:header")]);
        assert!(front.loads().is_empty());
        assert!(front_listener.seen().is_empty());
    }

    #[test]
    fn test_resolution_failure_is_wrapped_with_cause() {
        let loader = StaticLoader::new(vec![]);
        loader.set_resolver(Arc::new(LoaderResolver::default()));

        let err = loader.import(&"tpl:orphan".into()).unwrap_err();

        match &err {
            LoaderError::NoLoaderFound { resource, source } => {
                assert_eq!(*resource, Resource::new("tpl:orphan"));
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
        let cause = std::error::Error::source(&err).expect("cause preserved");
        assert!(cause.to_string().contains("tpl:orphan"));
    }

    #[test]
    fn test_duplicate_listener_notified_once() {
        let loader = StaticLoader::new(vec!["tpl:footer"]);
        let listener = Arc::new(RecordingListener::default());
        loader.add_listener(listener.clone());
        loader.add_listener(listener.clone());

        loader.import(&"tpl:footer".into()).unwrap();

        assert_eq!(listener.seen().len(), 1);
    }

    #[test]
    fn test_removed_listener_not_notified() {
        let loader = StaticLoader::new(vec!["tpl:footer"]);
        let listener = Arc::new(RecordingListener::default());
        loader.add_listener(listener.clone());
        loader.remove_listener(&(listener.clone() as Arc<dyn Listener>));

        loader.import(&"tpl:footer".into()).unwrap();

        assert!(listener.seen().is_empty());
    }

    #[test]
    fn test_load_all_is_not_transactional() {
        let loader = StaticLoader {
            entries: vec!["tpl:first", "tpl:second"],
            fail_on: Some("tpl:second"),
            ..Default::default()
        };
        let listener = Arc::new(RecordingListener::default());
        loader.add_listener(listener.clone());

        let err = loader.load(&"tpl:*".into(), LoadMode::All).unwrap_err();

        assert!(matches!(err, LoaderError::Io { .. }));
        assert_eq!(loader.loads(), vec![Resource::new("tpl:first")]);
        assert_eq!(listener.seen(), vec![Resource::new("tpl:first")]);
    }

    #[test]
    fn test_is_valid_never_loads() {
        let loader = StaticLoader::new(vec!["tpl:footer"]);

        assert!(loader.is_valid(&"tpl:footer".into(), SystemTime::now()));
        assert!(!loader.is_valid(&"tpl:missing".into(), SystemTime::now()));
        assert!(loader.loads().is_empty());
    }

    #[test]
    fn test_last_set_resolver_wins() {
        let loader = StaticLoader::new(vec![]);
        let first: Arc<dyn super::resolver::Resolver> = Arc::new(LoaderResolver::default());
        let second: Arc<dyn super::resolver::Resolver> = Arc::new(LoaderResolver::default());

        assert!(loader.resolver().is_none());
        loader.set_resolver(first);
        loader.set_resolver(second.clone());

        let current = loader.resolver().expect("resolver set");
        assert!(Arc::ptr_eq(&current, &second));
    }
}
