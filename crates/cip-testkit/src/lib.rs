//! cip-testkit
//!
//! Test doubles and fixtures for scenario tests across the workspace.
//! Never a dependency of production crates.

pub mod fixtures;
mod recording_sink;

pub use recording_sink::{RecordingSink, SinkCall, SinkOp};
