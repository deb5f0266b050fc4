//! Handler resolution: turn a matched [`Action`] into a call.

use crate::controller::{ControllerLoader, ControllerRef, LoadMiss, MethodCall};
use crate::handler::Action;
use crate::registry::ControllerRegistry;
use crate::runtime_config::RouterConfig;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, error};

/// Outcome of invoking one matched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A direct handler ran, or the requested controller method ran.
    Invoked,
    /// The controller was found but no method was requested or it lacked the
    /// requested one; `index` ran instead.
    IndexFallback,
    /// The controller source file does not exist; nothing ran.
    Missed,
    /// Nothing ran to completion: no factory for an existing file, or the
    /// handler panicked.
    Failed,
}

impl Resolution {
    /// Whether this invocation counts towards the dispatch total.
    #[must_use]
    pub fn counts(self) -> bool {
        matches!(self, Resolution::Invoked | Resolution::IndexFallback)
    }
}

/// Invokes direct handlers and resolves deferred controller references.
#[derive(Debug)]
pub struct HandlerResolver {
    loader: ControllerLoader,
}

/// A resolver with no registered controllers, rooted at the controller
/// directory from [`RouterConfig::from_env`].
impl Default for HandlerResolver {
    fn default() -> Self {
        Self::new(ControllerLoader::from_config(
            &RouterConfig::from_env(),
            ControllerRegistry::new(),
        ))
    }
}

impl HandlerResolver {
    #[must_use]
    pub fn new(loader: ControllerLoader) -> Self {
        Self { loader }
    }

    #[must_use]
    pub fn loader(&self) -> &ControllerLoader {
        &self.loader
    }

    /// Invoke `action` with `captures`.
    ///
    /// Panics raised by the handler are caught and reported as
    /// [`Resolution::Failed`] so the remaining candidates still run.
    pub fn invoke(&self, action: &Action, captures: &[String]) -> Resolution {
        match action {
            Action::Direct(handler) => {
                match catch_unwind(AssertUnwindSafe(|| handler.call(captures))) {
                    Ok(()) => Resolution::Invoked,
                    Err(panic) => {
                        error!(
                            action = %action,
                            panic = %panic_message(panic.as_ref()),
                            "Handler panicked"
                        );
                        Resolution::Failed
                    }
                }
            }
            Action::Deferred(reference) => self.invoke_controller(reference, captures),
        }
    }

    fn invoke_controller(&self, reference: &ControllerRef, captures: &[String]) -> Resolution {
        let factory = match self.loader.load(reference) {
            Ok(factory) => factory,
            Err(LoadMiss::MissingFile(_)) => return Resolution::Missed,
            Err(miss @ LoadMiss::Unregistered { .. }) => {
                error!(controller = %reference, reason = %miss, "Controller could not be loaded");
                return Resolution::Failed;
            }
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let mut controller = factory();
            let requested = reference.method_name().map(|method| {
                (method, controller.call(method, captures))
            });
            match requested {
                Some((_, MethodCall::Handled)) => Resolution::Invoked,
                Some((method, MethodCall::NoSuchMethod)) => {
                    debug!(
                        controller = %reference.qualified_name(),
                        method = method,
                        "Controller method not found, falling back to index"
                    );
                    controller.index();
                    Resolution::IndexFallback
                }
                None => {
                    controller.index();
                    Resolution::IndexFallback
                }
            }
        }));

        outcome.unwrap_or_else(|panic| {
            error!(
                controller = %reference,
                panic = %panic_message(panic.as_ref()),
                "Controller panicked"
            );
            Resolution::Failed
        })
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}
