//! Gated append-only text log.
//!
//! A [`LogStore`] owns the path of one `.txt` file. Every read and write first
//! passes the validity gate (extension + existence); when the gate fails the
//! operation becomes a no-op that reports a [`LogCondition`] instead of an
//! error. Only I/O failures on the file itself surface as `Err`.

mod sink;
mod store;

pub use sink::LogSink;
pub use store::{LOG_EXTENSION, LogCondition, LogRead, LogStore, WriteOutcome, has_log_extension};
