//! Route actions: what runs when a route entry matches.

use crate::controller::ControllerRef;
use crate::error::RouterError;
use std::fmt;
use std::sync::Arc;

/// Signature of an in-process route handler.
///
/// Captures arrive positionally: `captures[0]` is the first group of the
/// route pattern. Output goes through whatever response mechanism the
/// handler closes over; the router ignores it.
pub type HandlerFn = dyn Fn(&[String]) + Send + Sync;

/// Signature of the not-found handler, which takes no captures.
pub type NotFoundFn = dyn Fn() + Send + Sync;

/// A cheaply clonable, thread-safe route handler.
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    /// Wrap a closure or function as a handler.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the handler with the given captures.
    #[inline]
    pub fn call(&self, captures: &[String]) {
        (self.0)(captures);
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(<fn>)")
    }
}

/// The action attached to a route entry.
///
/// `Direct` handlers are called in-process. `Deferred` actions name a
/// controller type and method (`"admin/user@login"`) that is resolved on
/// first use through the controller loader.
#[derive(Clone, Debug)]
pub enum Action {
    Direct(Handler),
    Deferred(ControllerRef),
}

impl Action {
    /// Build a direct action from a closure.
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        Action::Direct(Handler::new(f))
    }

    /// Build a deferred action from a `namespace\Controller@method` string.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::ControllerRef`] when the reference names no
    /// controller.
    pub fn controller(reference: &str) -> Result<Self, RouterError> {
        ControllerRef::parse(reference).map(Action::Deferred)
    }
}

impl From<Handler> for Action {
    fn from(handler: Handler) -> Self {
        Action::Direct(handler)
    }
}

impl From<ControllerRef> for Action {
    fn from(reference: ControllerRef) -> Self {
        Action::Deferred(reference)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Direct(_) => f.write_str("<handler>"),
            Action::Deferred(reference) => write!(f, "{reference}"),
        }
    }
}
