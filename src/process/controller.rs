//! Start and terminate one named process, recording every outcome.
//!
//! Each call runs `Idle -> Validating -> {Aborted | Acting} -> {Recorded | Skipped}`
//! and keeps no state between calls beyond the log path and the target name.
//! Host failures become failure records; only log I/O errors return `Err`.

use std::path::Path;

use log::{debug, info, warn};

use super::host::{ProcessHandle, ProcessHost, SystemHost};
use super::record::{Outcome, OutcomeRecord, Verb};
use super::target::{ProcessTarget, TargetCondition};
use crate::clock::{Now, RECORD_STAMP};
use crate::error::Result;
use crate::logstore::{LogSink, LogStore, WriteOutcome};

/// Result of [`ProcessController::start_task`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartReport {
    /// Target refused before acting; nothing recorded
    NotLaunchable(TargetCondition),
    /// Launched; success recorded
    Started(ProcessHandle),
    /// Host refused to launch; failure recorded
    Failed(String),
}

/// Per-instance result inside an [`EndReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceOutcome {
    pub handle: ProcessHandle,
    pub outcome: Outcome,
}

/// Result of [`ProcessController::end_task`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndReport {
    /// Target refused before acting; nothing recorded
    NotLaunchable(TargetCondition),
    /// No running instance matched the bare name; nothing recorded
    NotActive(String),
    /// One entry per matched instance, in enumeration order
    Processed(Vec<InstanceOutcome>),
}

impl EndReport {
    /// Number of instances that failed to terminate
    pub fn failures(&self) -> usize {
        match self {
            Self::Processed(outcomes) => outcomes.iter().filter(|o| !o.outcome.is_success()).count(),
            _ => 0,
        }
    }
}

pub struct ProcessController<S = LogStore, H = SystemHost> {
    target: ProcessTarget,
    log: S,
    host: H,
    clock: Now,
}

impl ProcessController<LogStore, SystemHost> {
    /// Controller for `task` on the real OS, logging to `log_path`
    pub fn new(task: impl Into<String>, log_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_parts(
            ProcessTarget::new(task),
            LogStore::new(log_path)?,
            SystemHost::new(),
        ))
    }
}

impl<S: LogSink, H: ProcessHost> ProcessController<S, H> {
    pub fn with_parts(target: ProcessTarget, log: S, host: H) -> Self {
        Self {
            target,
            log,
            host,
            clock: RECORD_STAMP,
        }
    }

    /// Use a different timestamp layout for records
    pub fn with_clock(mut self, clock: Now) -> Self {
        self.clock = clock;
        self
    }

    pub fn target(&self) -> &ProcessTarget {
        &self.target
    }

    pub fn log(&self) -> &S {
        &self.log
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Launch the target.
    ///
    /// The log is created before anything else, even when the target is then
    /// refused.
    pub fn start_task(&mut self) -> Result<StartReport> {
        self.log.create()?;

        if let Err(condition) = self.target.check_launchable() {
            warn!("{}", condition);
            return Ok(StartReport::NotLaunchable(condition));
        }

        info!("Starting {}", self.target);
        match self.host.start(self.target.path()) {
            Ok(handle) => {
                self.record(Verb::Activate, Outcome::Success)?;
                Ok(StartReport::Started(handle))
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Failed to start {}: {}", self.target, message);
                self.record(Verb::Activate, Outcome::Failure(message.clone()))?;
                Ok(StartReport::Failed(message))
            }
        }
    }

    /// Terminate every running instance of the target.
    ///
    /// Requires the same `.exe` name as [`start_task`](Self::start_task), then
    /// matches processes by bare name. One failed kill never stops the rest.
    pub fn end_task(&mut self) -> Result<EndReport> {
        self.log.create()?;

        if let Err(condition) = self.target.check_launchable() {
            warn!("{}", condition);
            return Ok(EndReport::NotLaunchable(condition));
        }

        let bare_name = self.target.bare_name().to_string();
        let instances = self.host.list_by_name(&bare_name);
        if instances.is_empty() {
            warn!("{} is not active", bare_name);
            return Ok(EndReport::NotActive(bare_name));
        }

        info!("Terminating {} instance(s) of {}", instances.len(), bare_name);
        let mut outcomes = Vec::with_capacity(instances.len());
        for handle in instances {
            let outcome = match self.host.kill(&handle) {
                Ok(()) => Outcome::Success,
                Err(e) => {
                    warn!("Failed to terminate pid {}: {}", handle.pid, e);
                    Outcome::Failure(e.to_string())
                }
            };
            self.record(Verb::Terminate, outcome.clone())?;
            outcomes.push(InstanceOutcome { handle, outcome });
        }

        Ok(EndReport::Processed(outcomes))
    }

    /// Every record names the target by its bare name, so start and end lines match
    fn record(&mut self, verb: Verb, outcome: Outcome) -> Result<()> {
        let record = OutcomeRecord::new(verb, self.target.bare_name(), outcome, self.clock.date_time());
        match self.log.write(&record.to_string())? {
            WriteOutcome::Appended => debug!("Recorded: {}", record),
            WriteOutcome::Skipped(condition) => warn!("Outcome not recorded ({}): {}", condition, record),
        }
        Ok(())
    }
}
