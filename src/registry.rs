//! Controller registry: factories keyed by qualified controller name.
//!
//! The registry is filled at startup, before any request is served, and is
//! read-only afterwards. Names use `/` between namespace segments; a
//! backslash-separated name registers under the same key.

use crate::controller::{normalize_namespace, Controller, ControllerFactory};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `name` (e.g. `"user"` or `"admin/report"`).
    ///
    /// Registering the same name twice replaces the earlier factory.
    pub fn register<F, C>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Controller + 'static,
    {
        let key = normalize_namespace(name);
        debug!(controller = %key, "Registering controller factory");
        let factory: ControllerFactory =
            Arc::new(move || Box::new(factory()) as Box<dyn Controller>);
        self.factories.insert(key, factory);
    }

    /// Register a controller type constructed through `Default`.
    pub fn register_default<C>(&mut self, name: &str)
    where
        C: Controller + Default + 'static,
    {
        self.register(name, C::default);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<ControllerFactory> {
        self.factories.get(name).map(Arc::clone)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
