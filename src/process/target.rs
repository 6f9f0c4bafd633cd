//! The single named process a controller acts on.

use std::fmt;
use std::path::Path;

/// Suffix a target must carry to be launched (compared case-insensitively)
pub const EXECUTABLE_EXTENSION: &str = "exe";

/// Why a target was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetCondition {
    /// Name does not end in `.exe`
    NotExecutable(String),
}

impl fmt::Display for TargetCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotExecutable(name) => {
                write!(f, "{} is not an executable name (expected a .{} suffix)", name, EXECUTABLE_EXTENSION)
            }
        }
    }
}

/// Final path component, accepting either separator
fn file_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Strip a trailing `.exe` (any case), if present
pub fn strip_executable_extension(name: &str) -> &str {
    let suffix_len = EXECUTABLE_EXTENSION.len() + 1;
    if name.len() < suffix_len {
        return name;
    }
    let split = name.len() - suffix_len;
    match (name.get(..split), name.get(split..)) {
        (Some(stem), Some(suffix))
            if suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(EXECUTABLE_EXTENSION) =>
        {
            stem
        }
        _ => name,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTarget {
    name: String,
}

impl ProcessTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name as given, possibly a path
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as a filesystem path for launching
    pub fn path(&self) -> &Path {
        Path::new(&self.name)
    }

    /// Process name used for enumeration: last path component without `.exe`
    pub fn bare_name(&self) -> &str {
        strip_executable_extension(file_name(&self.name))
    }

    /// True when the file name ends in `.exe` and has a non-empty stem.
    /// Whether the file exists is left to the OS launcher.
    pub fn is_launchable(&self) -> bool {
        let file = file_name(&self.name);
        let stem = strip_executable_extension(file);
        stem.len() < file.len() && !stem.is_empty()
    }

    pub fn check_launchable(&self) -> Result<(), TargetCondition> {
        if self.is_launchable() {
            Ok(())
        } else {
            Err(TargetCondition::NotExecutable(self.name.clone()))
        }
    }
}

impl fmt::Display for ProcessTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
