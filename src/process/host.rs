//! Operating-system process operations behind a trait seam.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use log::debug;
use sysinfo::{Pid, ProcessRefreshKind, System, UpdateKind};
use thiserror::Error;

use super::target::strip_executable_extension;

/// A running process as seen by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    pub pid: u32,
    pub name: String,
}

impl ProcessHandle {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Self { pid, name: name.into() }
    }

    /// Name used in outcome records
    pub fn display_name(&self) -> &str {
        &self.name
    }
}

/// Failures reported by the host for a single launch or kill
#[derive(Debug, Error)]
pub enum HostError {
    #[error("{0}")]
    Spawn(#[from] io::Error),

    #[error("process {name} (pid {pid}) refused to terminate")]
    KillRefused { pid: u32, name: String },

    #[error("process {name} (pid {pid}) is no longer running")]
    Vanished { pid: u32, name: String },
}

/// What a controller needs from the operating system
pub trait ProcessHost {
    /// Launch the executable at `path` without waiting for it
    fn start(&mut self, path: &Path) -> Result<ProcessHandle, HostError>;

    /// All running processes whose name matches `bare_name`, in a stable order
    fn list_by_name(&mut self, bare_name: &str) -> Vec<ProcessHandle>;

    /// Terminate one process
    fn kill(&mut self, handle: &ProcessHandle) -> Result<(), HostError>;
}

/// Process name without directory or `.exe`, the way the host reports it
pub(crate) fn process_name_of(path: &Path) -> String {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    strip_executable_extension(&file).to_string()
}

/// Whether a host-reported process name denotes `bare_name`.
///
/// Windows reports `notepad.exe`, unix hosts report `notepad`; both match.
pub(crate) fn name_matches(reported: &str, bare_name: &str) -> bool {
    strip_executable_extension(reported).eq_ignore_ascii_case(bare_name)
}

/// Longest name the Linux kernel keeps for a process (`comm` minus its NUL)
const COMM_LEN: usize = 15;

/// Full process name if the process denotes `bare_name`, `None` otherwise.
///
/// A reported name of exactly [`COMM_LEN`] bytes may be a truncated `comm`,
/// so the executable path and then `argv[0]` are consulted as well.
pub(crate) fn matched_name(reported: &str, exe: Option<&Path>, argv0: Option<&str>, bare_name: &str) -> Option<String> {
    if name_matches(reported, bare_name) {
        return Some(strip_executable_extension(reported).to_string());
    }
    if reported.len() != COMM_LEN {
        return None;
    }
    exe.into_iter()
        .chain(argv0.map(Path::new))
        .map(process_name_of)
        .find(|name| name.eq_ignore_ascii_case(bare_name))
}

/// Real host: `std::process` to launch, `sysinfo` to enumerate and kill
#[derive(Debug)]
pub struct SystemHost {
    system: System,
    children: Vec<Child>,
}

impl SystemHost {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            children: Vec::new(),
        }
    }

    /// Wait on launched children that have exited so none is left a zombie
    fn reap(&mut self) {
        self.children.retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessHost for SystemHost {
    /// Launched processes outlive the host; the host only keeps each `Child`
    /// to collect its exit status once it finishes.
    fn start(&mut self, path: &Path) -> Result<ProcessHandle, HostError> {
        self.reap();
        let child = Command::new(path).spawn()?;
        let handle = ProcessHandle::new(child.id(), process_name_of(path));
        debug!("Spawned {} as pid {}", path.display(), handle.pid);
        self.children.push(child);
        Ok(handle)
    }

    fn list_by_name(&mut self, bare_name: &str) -> Vec<ProcessHandle> {
        self.reap();
        self.system.refresh_processes_specifics(
            ProcessRefreshKind::new()
                .with_exe(UpdateKind::OnlyIfNotSet)
                .with_cmd(UpdateKind::OnlyIfNotSet),
        );
        let processes = self.system.processes();

        // Linux lists every thread as its own entry; only thread-group leaders count
        let threads: HashSet<Pid> = processes
            .values()
            .filter_map(|p| p.tasks().map(|tasks| (p.pid(), tasks)))
            .flat_map(|(leader, tasks)| tasks.iter().copied().filter(move |tid| *tid != leader))
            .collect();

        let mut handles: Vec<ProcessHandle> = processes
            .values()
            .filter(|p| p.thread_kind().is_none() && !threads.contains(&p.pid()))
            .filter_map(|p| {
                let argv0 = p.cmd().first().map(String::as_str);
                matched_name(p.name(), p.exe(), argv0, bare_name).map(|name| ProcessHandle::new(p.pid().as_u32(), name))
            })
            .collect();
        handles.sort_by_key(|h| h.pid);

        debug!("Found {} running instance(s) of {}", handles.len(), bare_name);
        handles
    }

    fn kill(&mut self, handle: &ProcessHandle) -> Result<(), HostError> {
        let process = self.system.process(Pid::from_u32(handle.pid)).ok_or_else(|| HostError::Vanished {
            pid: handle.pid,
            name: handle.name.clone(),
        })?;

        if process.kill() {
            Ok(())
        } else {
            Err(HostError::KillRefused {
                pid: handle.pid,
                name: handle.name.clone(),
            })
        }
    }
}

/// In-memory host for tests: scripted processes, spawn failures and kill failures
#[derive(Debug, Default)]
pub struct MockHost {
    running: Vec<ProcessHandle>,
    refuse_kill: Vec<u32>,
    spawn_error: Option<String>,
    next_pid: u32,
    /// Paths passed to `start`, in call order
    pub started: Vec<PathBuf>,
    /// Pids passed to `kill`, in call order
    pub kill_attempts: Vec<u32>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            next_pid: 1000,
            ..Self::default()
        }
    }

    /// Pretend a process is running
    pub fn with_running(mut self, pid: u32, name: impl Into<String>) -> Self {
        self.running.push(ProcessHandle::new(pid, name));
        self
    }

    /// Make `kill` fail for this pid
    pub fn refusing_kill(mut self, pid: u32) -> Self {
        self.refuse_kill.push(pid);
        self
    }

    /// Make every `start` fail with this message
    pub fn failing_spawn(mut self, message: impl Into<String>) -> Self {
        self.spawn_error = Some(message.into());
        self
    }

    pub fn running(&self) -> &[ProcessHandle] {
        &self.running
    }
}

impl ProcessHost for MockHost {
    fn start(&mut self, path: &Path) -> Result<ProcessHandle, HostError> {
        self.started.push(path.to_path_buf());
        if let Some(message) = &self.spawn_error {
            return Err(HostError::Spawn(io::Error::other(message.clone())));
        }
        self.next_pid += 1;
        let handle = ProcessHandle::new(self.next_pid, process_name_of(path));
        self.running.push(handle.clone());
        Ok(handle)
    }

    fn list_by_name(&mut self, bare_name: &str) -> Vec<ProcessHandle> {
        self.running
            .iter()
            .filter(|h| name_matches(&h.name, bare_name))
            .cloned()
            .collect()
    }

    fn kill(&mut self, handle: &ProcessHandle) -> Result<(), HostError> {
        self.kill_attempts.push(handle.pid);
        if self.refuse_kill.contains(&handle.pid) {
            return Err(HostError::KillRefused {
                pid: handle.pid,
                name: handle.name.clone(),
            });
        }
        let before = self.running.len();
        self.running.retain(|h| h.pid != handle.pid);
        if self.running.len() == before {
            return Err(HostError::Vanished {
                pid: handle.pid,
                name: handle.name.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_name_of() {
        assert_eq!(process_name_of(Path::new("/opt/app/tool.exe")), "tool");
        assert_eq!(process_name_of(Path::new("tool.EXE")), "tool");
        assert_eq!(process_name_of(Path::new("tool")), "tool");
    }

    #[test]
    fn test_name_matches() {
        assert!(name_matches("notepad.exe", "notepad"));
        assert!(name_matches("Notepad.EXE", "notepad"));
        assert!(name_matches("notepad", "notepad"));
        assert!(!name_matches("notepad++", "notepad"));
        assert!(!name_matches("note", "notepad"));
    }

    #[test]
    fn test_matched_name_uses_exe_for_truncated_comm() {
        let bare = "proclog-very-long-process-name";
        let exe = Path::new("/tmp/run/proclog-very-long-process-name");
        assert_eq!(
            matched_name("proclog-very-lo", Some(exe), None, bare),
            Some(bare.to_string())
        );
        assert_eq!(
            matched_name("proclog-very-lo", None, Some("./proclog-very-long-process-name.exe"), bare),
            Some(bare.to_string())
        );
        assert_eq!(matched_name("proclog-very-lo", None, None, bare), None);
    }

    #[test]
    fn test_matched_name_short_names() {
        assert_eq!(matched_name("notepad.exe", None, None, "notepad"), Some("notepad".to_string()));
        // A short comm is never truncated, so the exe path is not consulted
        let exe = Path::new("/usr/bin/notepad");
        assert_eq!(matched_name("wrapper", Some(exe), None, "notepad"), None);
        // A truncated comm still needs the full name to match
        let other = Path::new("/usr/bin/proclog-very-long-other");
        assert_eq!(matched_name("proclog-very-lo", Some(other), None, "proclog-very-long-name"), None);
    }

    #[test]
    fn test_host_error_messages() {
        let err = HostError::KillRefused {
            pid: 7,
            name: "tool".to_string(),
        };
        assert_eq!(err.to_string(), "process tool (pid 7) refused to terminate");

        let err: HostError = io::Error::other("access denied").into();
        assert_eq!(err.to_string(), "access denied");
    }

    #[test]
    fn test_system_host_spawn_missing_file() {
        let mut host = SystemHost::new();
        let result = host.start(Path::new("/definitely/not/here/tool.exe"));
        assert!(matches!(result, Err(HostError::Spawn(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_host_reaps_finished_children() {
        let mut host = SystemHost::new();
        let handle = host.start(Path::new("true")).unwrap();
        assert_eq!(host.children.len(), 1);
        assert_eq!(host.children[0].id(), handle.pid);

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while !host.children.is_empty() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(20));
            host.reap();
        }
        assert!(host.children.is_empty());
    }

    #[test]
    fn test_system_host_unknown_name_lists_nothing() {
        let mut host = SystemHost::new();
        assert!(host.list_by_name("proclog-no-such-process-name").is_empty());
    }

    #[test]
    fn test_system_host_kill_vanished_pid() {
        let mut host = SystemHost::new();
        let ghost = ProcessHandle::new(u32::MAX - 1, "ghost");
        assert!(matches!(host.kill(&ghost), Err(HostError::Vanished { .. })));
    }

    #[test]
    fn test_mock_host_start_and_kill() {
        let mut host = MockHost::new();
        let handle = host.start(Path::new("bin/tool.exe")).unwrap();
        assert_eq!(handle.display_name(), "tool");
        assert_eq!(host.list_by_name("tool"), vec![handle.clone()]);

        host.kill(&handle).unwrap();
        assert!(host.list_by_name("tool").is_empty());
        assert!(matches!(host.kill(&handle), Err(HostError::Vanished { .. })));
    }

    #[test]
    fn test_mock_host_scripted_failures() {
        let mut host = MockHost::new().with_running(5, "tool").refusing_kill(5).failing_spawn("nope");
        assert!(matches!(host.start(Path::new("tool.exe")), Err(HostError::Spawn(_))));
        let handle = ProcessHandle::new(5, "tool");
        assert!(matches!(host.kill(&handle), Err(HostError::KillRefused { .. })));
        assert_eq!(host.running().len(), 1);
    }
}
