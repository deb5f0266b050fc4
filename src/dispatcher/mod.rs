//! # Dispatcher Module
//!
//! Orchestrates a single request over the route table.
//!
//! ## Request Flow
//!
//! 1. Strip one leading `/` from the request path
//! 2. Invoke every matching before-route, in registration order (not counted)
//! 3. Invoke every matching main route, in registration order, counting the
//!    successful invocations
//! 4. If none counted, invoke the not-found handler and report 1
//!
//! A direct handler always counts. A controller route counts when its source
//! file exists and the controller was built, whether the requested method or
//! the `index` fallback ran. A missing controller file silently skips the
//! route.
//!
//! ## Before-routes
//!
//! Before-routes are guards. They cannot stop the main phase from running;
//! a guard that wants to end the request does so through the response it
//! writes to (for example by marking it finished), which is the transport's
//! concern.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use multiroute::dispatcher::Dispatcher;
//! use multiroute::handler::Action;
//!
//! let mut dispatcher = Dispatcher::default();
//! dispatcher.add_get("", Action::handler(|_| println!("Homepage!"))).unwrap();
//! dispatcher.add_get("test", Action::handler(|_| println!("first"))).unwrap();
//! dispatcher.add_get("test", Action::handler(|_| println!("second"))).unwrap();
//! dispatcher.add_404(|| println!("404!"));
//!
//! assert_eq!(dispatcher.serve(&Method::GET, "/"), 1);
//! assert_eq!(dispatcher.serve(&Method::GET, "/test"), 2);
//! assert_eq!(dispatcher.serve(&Method::GET, "/nope"), 1);
//! ```

mod core;

pub use self::core::Dispatcher;
