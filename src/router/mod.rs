//! # Router Module
//!
//! Route patterns and the ordered route table.
//!
//! ## Overview
//!
//! - [`Pattern`] compiles a regular-expression route pattern and anchors it
//!   at both ends, so `admin/(\d+)` matches `/admin/5` but not
//!   `/admin/5/edit`.
//! - [`RouteTable`] keeps two ordered lists, before-routes and main routes,
//!   plus the not-found handler. A `"GET|POST"` registration yields one
//!   entry per method.
//!
//! ## Matching Semantics
//!
//! Matching is a linear scan in registration order and is **multi-match**:
//! every entry whose method and pattern match is returned, not only the
//! first. Two `GET test` routes both fire for `GET /test`.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use multiroute::handler::Action;
//! use multiroute::router::{RouteList, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table.register("GET", r"admin/renameUser/(\d+)/(\w+)=(\w+)", Action::handler(|_| {})).unwrap();
//!
//! let m = table.match_all(RouteList::Main, &Method::GET, "admin/renameUser/7/Swen=Test");
//! assert_eq!(m[0].captures.as_slice(), ["7", "Swen", "Test"]);
//! ```

mod pattern;
mod table;

pub use pattern::{normalize_path, Captures, Pattern, MAX_INLINE_CAPTURES};
pub use table::{RouteEntry, RouteList, RouteMatch, RouteTable, METHOD_LIST_SEPARATOR};
