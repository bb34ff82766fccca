//! SPD Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared infrastructure for the SPD workspace members.
//!
//! Currently this crate carries the logging configuration and initialization
//! used by every SPD binary.
//!
//! # Example
//!
//! ```no_run
//! use spd_common::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env().unwrap();
//! init_logging(&config).unwrap();
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig, LogLevel};
