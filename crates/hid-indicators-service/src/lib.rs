//! hid-indicators-service library entry point.
//!
//! Exposes the application and infrastructure layers so the binary in
//! `main.rs` and the integration tests in `tests/` build on the same code.

pub mod application;
pub mod infrastructure;
