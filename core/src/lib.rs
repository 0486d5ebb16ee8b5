//! # Lodestone - Core API Documentation
//!
//! Lodestone is a clean, trait driven Rust library for loading and
//! resolving resources: templates, configuration files, fixtures — any
//! named unit of content.
//!
//! ## Features
//!
//! - **One small contract** — the [`Loader`](loader::Loader) trait:
//!   implement four lookup primitives, get the whole load/import
//!   protocol for free
//! - **Delegation** via [`Resolver`](loader::resolver::Resolver)s: a
//!   loader that cannot handle a resource asks its resolver for one
//!   that can
//! - **Observers**: [`Listener`](loader::Listener)s are notified after
//!   every successful load, by the loader that did the work
//! - **Staleness checks** for cache-aware callers, without triggering
//!   loads
//! - **Builtins**: an in-memory loader and a search-path file loader
//! - **Decorators**: wrap any loader to add cross-cutting behavior,
//!   like the bundled [`LoggingLoader`](loader::logging::LoggingLoader)
//!
//! ## Loading and delegating
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use lodestone::prelude::*;
//!
//! struct PrintListener;
//!
//! impl Listener for PrintListener {
//!     fn on_loaded(&self, resource: &Resource) {
//!         println!("loaded {resource}");
//!     }
//! }
//!
//! let templates = Arc::new(InMemoryLoader::new());
//! templates.insert("tpl:header", "<header/>");
//! templates.add_listener(Arc::new(PrintListener));
//!
//! let configs = Arc::new(InMemoryLoader::new());
//! configs.insert("conf:app", "debug = true");
//!
//! // `templates` cannot handle `conf:app` itself; its resolver finds a
//! // loader that can, and that loader's listeners own the notification.
//! templates.set_resolver(Arc::new(LoaderResolver::new(vec![
//!     configs.clone() as Arc<dyn Loader>,
//! ])));
//!
//! templates.import(&"tpl:header".into()).unwrap();
//! templates.import(&"conf:app".into()).unwrap();
//!
//! assert_eq!(configs.artifact(&"conf:app".into()).as_deref(), Some("debug = true"));
//! ```
//!
//! ## Checking freshness
//!
//! ```rust,no_run
//! use std::time::SystemTime;
//!
//! use lodestone::prelude::*;
//!
//! let loader = FileLoader::new(vec!["templates".into()]);
//! let resource = Resource::new("header.html");
//!
//! // A caching wrapper can skip the reload while the artifact it
//! // produced at `cached_at` is still fresh.
//! let cached_at = SystemTime::now();
//! if !loader.is_valid(&resource, cached_at) {
//!     loader.load(&resource, LoadMode::One).unwrap();
//! }
//! ```

/// Error types for all library operations
pub mod error;

/// Resource loading, resolution and notification
pub mod loader;

/// Convenience prelude exports
pub mod prelude;

/// Resource identity values
pub mod resource;
