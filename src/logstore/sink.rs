//! The two log operations a process controller depends on.

use std::path::PathBuf;

use super::store::{LogStore, WriteOutcome};
use crate::error::Result;

/// Destination for outcome records.
///
/// Validity gating is the sink's own business: `write` reports a skipped
/// write as a value, never as an error.
pub trait LogSink {
    /// Make sure the log exists and return its path
    fn create(&mut self) -> Result<PathBuf>;

    /// Append one line
    fn write(&mut self, line: &str) -> Result<WriteOutcome>;
}

impl LogSink for LogStore {
    fn create(&mut self) -> Result<PathBuf> {
        LogStore::create(self)
    }

    fn write(&mut self, line: &str) -> Result<WriteOutcome> {
        LogStore::write(self, line)
    }
}
