//! # Controller Module
//!
//! Deferred route actions. A route may name a controller instead of a
//! closure:
//!
//! ```rust,ignore
//! dispatcher.add("GET", "login", Action::controller("user@login")?)?;
//! ```
//!
//! On a match the [`ControllerLoader`] maps the reference to a source file
//! under the configured controller directory (`<dir>/<namespace>/user.rs`).
//! When that file is present the controller factory registered under the
//! same qualified name is resolved once, memoized per path, and used to
//! build a fresh controller for every invocation. When the file is absent
//! the route simply does not fire.
//!
//! ## Method resolution
//!
//! The requested method receives the complete capture list as a single
//! argument. A controller reports [`MethodCall::NoSuchMethod`] for names it
//! does not know; the router then calls [`Controller::index`] with no
//! arguments instead.

mod loader;
mod reference;

pub use loader::{ControllerFactory, ControllerLoader, LoadMiss};
pub use reference::{ControllerRef, METHOD_SEPARATOR, NAMESPACE_SEPARATORS};
pub(crate) use reference::normalize_namespace;

/// Whether a controller recognised the method it was asked to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodCall {
    Handled,
    NoSuchMethod,
}

/// A request controller built by a registered factory.
///
/// Implementations dispatch on the method name themselves, typically with a
/// `match`, and must not produce side effects for names they do not handle.
pub trait Controller: Send {
    /// Run `method` with the route captures.
    fn call(&mut self, method: &str, captures: &[String]) -> MethodCall;

    /// Fallback when no method was requested or the requested one is unknown.
    fn index(&mut self);
}
