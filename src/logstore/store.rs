//! File-backed log store with per-call open/close.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{ProclogError, Result};

/// Extension every valid log file carries (compared case-insensitively)
pub const LOG_EXTENSION: &str = "txt";

/// Why a log operation was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogCondition {
    /// Path does not end in `.txt`
    MissingExtension(PathBuf),
    /// Path is well-formed but nothing is on disk
    NotFound(PathBuf),
    /// File exists but holds no lines
    Empty(PathBuf),
    /// Store was deleted and holds no path
    Cleared,
}

impl fmt::Display for LogCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingExtension(path) => write!(
                f,
                "File {} does not have a valid file extension of .{}; select a file with a valid extension",
                path.display(),
                LOG_EXTENSION
            ),
            Self::NotFound(path) => {
                write!(f, "File {} does not exist; create the file then try again", path.display())
            }
            Self::Empty(path) => write!(f, "File {} is empty; write to the file then try again", path.display()),
            Self::Cleared => write!(f, "Log was deleted; create a new log then try again"),
        }
    }
}

/// Result of reading the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRead {
    /// Every line of the file, in file order
    Lines(Vec<String>),
    /// The gate failed or the file was empty
    Invalid(LogCondition),
}

impl LogRead {
    /// Lines if the read succeeded
    pub fn lines(self) -> Option<Vec<String>> {
        match self {
            Self::Lines(lines) => Some(lines),
            Self::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Lines(_))
    }
}

/// Result of writing to the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Message was appended
    Appended,
    /// Gate failed; nothing was written
    Skipped(LogCondition),
}

impl WriteOutcome {
    pub fn is_appended(&self) -> bool {
        matches!(self, Self::Appended)
    }
}

/// Check whether a path ends in the log extension
pub fn has_log_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LOG_EXTENSION))
}

/// Append the log extension unless it is already there
fn normalize(path: &Path) -> PathBuf {
    if has_log_extension(path) {
        return path.to_path_buf();
    }
    let mut raw = path.as_os_str().to_os_string();
    raw.push(".");
    raw.push(LOG_EXTENSION);
    PathBuf::from(raw)
}

/// Owner of a single append-only text log file
#[derive(Debug, Clone)]
pub struct LogStore {
    path: Option<PathBuf>,
}

impl LogStore {
    /// Create a store for the given path. Nothing is touched on disk.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(ProclogError::InvalidPath(path.to_path_buf()));
        }
        Ok(Self {
            path: Some(path.to_path_buf()),
        })
    }

    /// Currently held path, `None` after [`LogStore::delete`]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Materialize the log file and return its path.
    ///
    /// An existing file at the held path is returned as-is. Otherwise the path
    /// gains the `.txt` extension (once), the file is created without
    /// truncating anything already there, and the store adopts the new path.
    pub fn create(&mut self) -> Result<PathBuf> {
        let path = self.path.as_ref().ok_or(ProclogError::PathCleared)?;
        if path.is_file() {
            debug!("Log already exists at {}", path.display());
            return Ok(path.clone());
        }

        let normalized = normalize(path);
        OpenOptions::new().create(true).append(true).open(&normalized)?;
        info!("Created log at {}", normalized.display());

        self.path = Some(normalized.clone());
        Ok(normalized)
    }

    /// The validity gate: extension and existence must both hold
    pub fn validate(&self) -> std::result::Result<&Path, LogCondition> {
        let condition = match self.path.as_deref() {
            None => LogCondition::Cleared,
            Some(path) if !has_log_extension(path) => LogCondition::MissingExtension(path.to_path_buf()),
            Some(path) if !path.is_file() => LogCondition::NotFound(path.to_path_buf()),
            Some(path) => return Ok(path),
        };
        warn!("{}", condition);
        Err(condition)
    }

    /// Read every line of the log
    pub fn read(&self) -> Result<LogRead> {
        let path = match self.validate() {
            Ok(path) => path,
            Err(condition) => return Ok(LogRead::Invalid(condition)),
        };

        let content = fs::read_to_string(path)?;
        let lines: Vec<String> = content.lines().map(String::from).collect();
        if lines.is_empty() {
            let condition = LogCondition::Empty(path.to_path_buf());
            warn!("{}", condition);
            return Ok(LogRead::Invalid(condition));
        }

        Ok(LogRead::Lines(lines))
    }

    /// Append one line. Never creates the file.
    pub fn write(&self, message: &str) -> Result<WriteOutcome> {
        let path = match self.validate() {
            Ok(path) => path,
            Err(condition) => return Ok(WriteOutcome::Skipped(condition)),
        };

        let mut file = OpenOptions::new().append(true).open(path)?;
        writeln!(file, "{}", message)?;
        debug!("Appended to {}: {}", path.display(), message);
        Ok(WriteOutcome::Appended)
    }

    /// Remove the file if present and clear the held path
    pub fn delete(&mut self) -> Result<()> {
        let Some(path) = self.path.take() else {
            return Ok(());
        };

        match fs::remove_file(&path) {
            Ok(()) => info!("Deleted log at {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => debug!("No log to delete at {}", path.display()),
            Err(e) => {
                self.path = Some(path);
                return Err(e.into());
            }
        }
        Ok(())
    }
}
