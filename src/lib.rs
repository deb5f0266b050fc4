//! # multiroute
//!
//! An ordered, **multi-match** request router with a pre-dispatch phase and
//! lazily resolved controllers.
//!
//! ## Overview
//!
//! Routes are regular-expression patterns matched against the whole request
//! path. Unlike first-match routers, every registered route whose method and
//! pattern match a request runs, in registration order. Before-routes run
//! ahead of the main routes (authorization guards and the like), and a
//! not-found handler runs when no main route fired.
//!
//! ## Architecture
//!
//! - **[`router`]** - Pattern compilation and the ordered route table
//! - **[`handler`]** - Route actions: closures or deferred controller references
//! - **[`controller`]** - Controller trait, `Controller@method` parsing, load-once file resolution
//! - **[`registry`]** - Controller factories keyed by qualified name
//! - **[`resolver`]** - Invokes a matched action and reports whether it counted
//! - **[`dispatcher`]** - Registration API and the per-request dispatch algorithm
//! - **[`context`]** - Explicit request context supplied by the transport
//! - **[`runtime_config`]** - Controller directory settings (TOML + environment)
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Transport
//!     participant Dispatcher
//!     participant Table as RouteTable
//!     participant Resolver as HandlerResolver
//!     participant Loader as ControllerLoader
//!
//!     Transport->>Dispatcher: serve(GET, "/admin/deleteUser/5")
//!     Dispatcher->>Table: matches(Before, GET, "admin/deleteUser/5")
//!     loop every matching before-route
//!         Dispatcher->>Resolver: invoke(action, captures)
//!     end
//!     Dispatcher->>Table: matches(Main, GET, "admin/deleteUser/5")
//!     loop every matching main route
//!         Dispatcher->>Resolver: invoke(action, captures)
//!         alt controller reference
//!             Resolver->>Loader: load(user@login)
//!             Loader-->>Resolver: factory or miss
//!         end
//!         Resolver-->>Dispatcher: Resolution
//!     end
//!     alt nothing counted
//!         Dispatcher->>Dispatcher: not-found handler, count = 1
//!     end
//!     Dispatcher-->>Transport: count
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use multiroute::{Action, Dispatcher};
//!
//! let mut router = Dispatcher::default();
//! router
//!     .add_get(r"admin/deleteUser/(\d+)", Action::handler(|caps| {
//!         println!("Delete user {}!", caps[0]);
//!     }))
//!     .unwrap();
//! router.add_404(|| println!("404!"));
//!
//! assert_eq!(router.serve(&Method::GET, "/admin/deleteUser/1673"), 1);
//! ```
//!
//! ## Concurrency
//!
//! Registration needs `&mut Dispatcher`; serving needs only `&Dispatcher`.
//! Build the table at startup, then share it (e.g. in an `Arc`) across
//! request threads. Controller files are resolved at most once per path
//! even under concurrent first use.

pub mod cli;
pub mod context;
pub mod controller;
pub mod controllers;
pub mod demo;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod logging;
pub mod registry;
pub mod resolver;
pub mod router;
pub mod runtime_config;

pub use context::RequestContext;
pub use controller::{Controller, ControllerRef, MethodCall};
pub use dispatcher::Dispatcher;
pub use error::RouterError;
pub use handler::{Action, Handler};
pub use registry::ControllerRegistry;
pub use resolver::{HandlerResolver, Resolution};
pub use router::{Captures, Pattern, RouteEntry, RouteList, RouteTable};
pub use runtime_config::RouterConfig;
