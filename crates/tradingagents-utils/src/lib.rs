//! Shared utilities for tradingagents
//!
//! Logging setup and the per-user directories the CLI reads from.

pub mod logging;
pub mod paths;

pub use logging::init_tracing;
pub use paths::{app_config_dir, default_profiles_dir};
