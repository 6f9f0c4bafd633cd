//! Date/time rendering and a simple stopwatch.

mod format;
mod stopwatch;

pub use format::{DateFormat, Now, Order, RECORD_STAMP, TimeFormat};
pub use stopwatch::Stopwatch;
