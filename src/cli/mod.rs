//! # CLI Module
//!
//! Command-line front end for the demo application.
//!
//! ## Commands
//!
//! ### `dispatch`
//!
//! Serve one request and print the status line, headers and body:
//!
//! ```bash
//! multiroute dispatch --path /test
//! multiroute dispatch --path /admin/renameUser/7/Swen=Test --user-level 2
//! multiroute dispatch -m POST --path /api/sendback --body '{"a":1}'
//! ```
//!
//! ### `routes`
//!
//! Print the registered before-routes and main routes in evaluation order:
//!
//! ```bash
//! multiroute routes
//! ```
//!
//! Both commands accept `--config <FILE>` to point controller resolution at
//! a different directory.

mod commands;


pub use commands::{run_cli, Cli, Commands};
