//! Controllers of the demo application.
//!
//! This directory doubles as the default controller directory: a
//! `user@login` route resolves to `src/controllers/user.rs` and fires only
//! while that file is present.

pub mod user;

pub use user::UserController;
