use std::sync::{Arc, Mutex};

use super::resolver::Resolver;
use super::Listener;
use crate::resource::Resource;

/// Listener and resolver registrations shared by every loader.
///
/// Listener identity is the `Arc` allocation: registering the same
/// handle twice keeps a single entry, and removing an unknown handle
/// does nothing. Notification order is registration order. The loader
/// holds at most one resolver; setting a new one replaces the old.
#[derive(Default)]
pub struct LoaderState {
    listeners: Mutex<Vec<Arc<dyn Listener>>>,
    resolver: Mutex<Option<Arc<dyn Resolver>>>,
}

impl LoaderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&self, listener: Arc<dyn Listener>) {
        let mut listeners = self.listeners.lock().unwrap();
        if !listeners.iter().any(|known| Arc::ptr_eq(known, &listener)) {
            listeners.push(listener);
        }
    }

    pub fn remove_listener(&self, listener: &Arc<dyn Listener>) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|known| !Arc::ptr_eq(known, listener));
    }

    pub fn set_resolver(&self, resolver: Arc<dyn Resolver>) {
        *self.resolver.lock().unwrap() = Some(resolver);
    }

    pub fn resolver(&self) -> Option<Arc<dyn Resolver>> {
        self.resolver.lock().unwrap().clone()
    }

    /// Calls `on_loaded` on every registered listener.
    ///
    /// The list is snapshotted before calling out, so a listener may add
    /// or remove registrations from inside its callback.
    pub fn notify(&self, resource: &Resource) {
        let listeners: Vec<_> = self.listeners.lock().unwrap().clone();
        for listener in &listeners {
            listener.on_loaded(resource);
        }
    }
}
