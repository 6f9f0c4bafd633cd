//! Process lifecycle control.
//!
//! A [`ProcessController`] owns one [`ProcessTarget`], one log sink and one
//! process host. Starting and terminating are synchronous and best-effort:
//! every attempt ends up as a line in the log.

mod controller;
mod host;
mod record;
mod target;

pub use controller::{EndReport, InstanceOutcome, ProcessController, StartReport};
pub use host::{HostError, MockHost, ProcessHandle, ProcessHost, SystemHost};
pub use record::{Outcome, OutcomeRecord, PROCESS_COMPONENT, Verb};
pub use target::{EXECUTABLE_EXTENSION, ProcessTarget, TargetCondition, strip_executable_extension};
