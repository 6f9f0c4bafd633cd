//! proclog - log-gated process lifecycle control
//!
//! Starts and terminates an operating-system process by name and records the
//! outcome of every attempt as one line in a gated, append-only text log.

pub mod clock;
pub mod error;
pub mod logstore;
pub mod process;

pub use error::{ProclogError, Result};
