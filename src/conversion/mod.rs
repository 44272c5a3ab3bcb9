//! MMS to SMS conversion module
//!
//! This module contains the core pipeline logic, configuration, and run
//! statistics.

pub mod config;
pub mod engine;
pub mod stats;

pub use config::ConvertConfig;
pub use engine::{convert_file, Converter, NormalizedSms};
pub use stats::ConvertStats;
