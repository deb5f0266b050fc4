use crate::context::RequestContext;
use crate::error::RouterError;
use crate::handler::Action;
use crate::resolver::{HandlerResolver, Resolution};
use crate::router::{normalize_path, RouteEntry, RouteList, RouteTable};
use http::Method;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Route registration plus the per-request dispatch algorithm.
///
/// Registration takes `&mut self` and happens once at startup; [`serve`]
/// takes `&self`, so a fully built dispatcher can be shared between threads
/// (e.g. behind an `Arc`) and serve requests concurrently.
///
/// [`serve`]: Dispatcher::serve
#[derive(Debug, Default)]
pub struct Dispatcher {
    table: RouteTable,
    resolver: HandlerResolver,
}

impl Dispatcher {
    #[must_use]
    pub fn new(resolver: HandlerResolver) -> Self {
        Self {
            table: RouteTable::new(),
            resolver,
        }
    }

    /// Register a main route for every method in `methods` (`"GET|POST"`).
    ///
    /// # Errors
    ///
    /// [`RouterError::Pattern`] for an invalid pattern, [`RouterError::Method`]
    /// for an invalid method segment.
    pub fn add(&mut self, methods: &str, pattern: &str, action: Action) -> Result<(), RouterError> {
        self.table.register(methods, pattern, action)
    }

    /// Register a `GET` main route.
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn add_get(&mut self, pattern: &str, action: Action) -> Result<(), RouterError> {
        self.add("GET", pattern, action)
    }

    /// Register a before-route. Before-routes run ahead of the main routes on
    /// every request and never count as a match.
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn add_before(
        &mut self,
        methods: &str,
        pattern: &str,
        action: Action,
    ) -> Result<(), RouterError> {
        self.table.register_before(methods, pattern, action)
    }

    /// Register a `GET` before-route.
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn add_before_get(&mut self, pattern: &str, action: Action) -> Result<(), RouterError> {
        self.add_before("GET", pattern, action)
    }

    /// Replace the not-found handler.
    pub fn add_404<F>(&mut self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.table.set_not_found(handler);
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn resolver(&self) -> &HandlerResolver {
        &self.resolver
    }

    /// Main routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteEntry] {
        self.table.list(RouteList::Main)
    }

    /// Before-routes in registration order.
    #[must_use]
    pub fn before_routes(&self) -> &[RouteEntry] {
        self.table.list(RouteList::Before)
    }

    /// Log every registered route at `info` level.
    pub fn dump_routes(&self) {
        info!(
            before_count = self.before_routes().len(),
            main_count = self.routes().len(),
            "Registered routes"
        );
        for entry in self.before_routes() {
            info!(list = "before", route = %entry, "Route");
        }
        for entry in self.routes() {
            info!(list = "main", route = %entry, "Route");
        }
    }

    /// Dispatch one request.
    ///
    /// Runs every matching before-route, then every matching main route, and
    /// falls back to the not-found handler when no main route fired. Returns
    /// the number of main-route invocations that succeeded, or 1 when the
    /// not-found handler ran.
    pub fn serve(&self, method: &Method, path: &str) -> usize {
        let start = Instant::now();
        let path = normalize_path(path);

        debug!(method = %method, path = %path, "Dispatch started");

        if !self.before_routes().is_empty() {
            let fired = self.run_phase(RouteList::Before, method, path);
            debug!(method = %method, path = %path, fired, "Before-routes finished");
        }

        let mut found = 0;
        if !self.routes().is_empty() {
            found = self.run_phase(RouteList::Main, method, path);
        }

        if found == 0 {
            warn!(
                method = %method,
                path = %path,
                duration_us = start.elapsed().as_micros(),
                "No route matched, invoking not-found handler"
            );
            (self.table.not_found())();
            found = 1;
        } else {
            info!(
                method = %method,
                path = %path,
                invocations = found,
                duration_us = start.elapsed().as_micros(),
                "Request dispatched"
            );
        }

        found
    }

    /// Dispatch a request described by a [`RequestContext`].
    pub fn serve_request(&self, ctx: &RequestContext) -> usize {
        self.serve(&ctx.method, &ctx.path)
    }

    /// Invoke every match of one list in order and count the invocations
    /// that succeeded.
    fn run_phase(&self, list: RouteList, method: &Method, path: &str) -> usize {
        let mut count = 0;
        for route_match in self.table.matches(list, method, path) {
            let resolution = self
                .resolver
                .invoke(route_match.action(), &route_match.captures);
            debug!(
                list = list.as_str(),
                route = %route_match.entry,
                captures = ?route_match.captures,
                resolution = ?resolution,
                "Route matched"
            );
            if resolution == Resolution::Missed {
                debug!(route = %route_match.entry, "Controller file missing, route skipped");
            }
            if resolution.counts() {
                count += 1;
            }
        }
        count
    }
}
