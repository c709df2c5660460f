//! A nagios/icinga check for NETIO power distribution units.
//!
//! One invocation performs a single HTTP GET against the device's JSON
//! endpoint, classifies the result and exits with the usual plugin exit
//! codes (0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN).

pub mod checks;
pub mod cli;
pub mod client;
pub mod config_generator;
pub mod error;
pub mod model;
pub mod plugin;
pub mod runner;

pub use crate::error::CheckError;
pub use crate::plugin::{Metric, PerfValue, Resource, ServiceState, Unit};
pub use crate::runner::{Runner, RunnerResult};
