//! cip-daemon library target.
//!
//! Exposes the router, state and poll loops for scenario tests.
//! The binary `main.rs` depends on this library target.

pub mod api_types;
pub mod poller;
pub mod routes;
pub mod state;
