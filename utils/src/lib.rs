//! Shared utilities for the goodhaul workspace.

pub mod logging;

pub use logging::init_tracing;
