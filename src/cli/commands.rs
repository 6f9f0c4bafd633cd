//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - start/end: launch or terminate the target process
//! - log: create, read, write or delete the outcome log
//! - now: print the current date/time

use clap::{Parser, Subcommand};
use proclog::clock::{DateFormat, Order, TimeFormat};
use std::path::PathBuf;

/// proclog - start and stop processes by name, with every outcome logged
#[derive(Parser, Debug)]
#[command(name = "proclog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Outcome log path (overrides config)
    #[arg(short, long, global = true)]
    pub log: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch a process (name must end in .exe)
    Start {
        /// Executable path
        target: String,
    },

    /// Terminate every running instance of a process
    End {
        /// Executable name; matched against running processes without .exe
        target: String,
    },

    /// Outcome log maintenance
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },

    /// Print the current date and time
    Now {
        /// Date layout
        #[arg(short, long, value_enum)]
        date: Option<DateFormat>,

        /// Time layout
        #[arg(short, long, value_enum)]
        time: Option<TimeFormat>,

        /// How date and time are joined
        #[arg(short, long, value_enum)]
        order: Option<Order>,
    },
}

/// Log subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum LogCommands {
    /// Create the log file if missing
    Create,

    /// Print every line of the log
    Read,

    /// Append a line to the log
    Write {
        /// Line to append
        message: String,
    },

    /// Delete the log file
    Delete,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["proclog"]).is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["proclog", "-v", "-c", "/etc/p.yml", "-l", "audit", "log", "read"]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.config, Some(PathBuf::from("/etc/p.yml")));
        assert_eq!(cli.log, Some(PathBuf::from("audit")));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["proclog", "end", "tool.exe", "--log", "audit.txt"]).unwrap();
        assert_eq!(cli.log, Some(PathBuf::from("audit.txt")));
    }

    #[test]
    fn test_start_command() {
        let cli = Cli::try_parse_from(["proclog", "start", "notepad.exe"]).unwrap();
        match cli.command {
            Commands::Start { target } => assert_eq!(target, "notepad.exe"),
            _ => panic!("Expected start command"),
        }
    }

    #[test]
    fn test_end_command() {
        let cli = Cli::try_parse_from(["proclog", "end", "notepad.exe"]).unwrap();
        match cli.command {
            Commands::End { target } => assert_eq!(target, "notepad.exe"),
            _ => panic!("Expected end command"),
        }
    }

    #[test]
    fn test_log_subcommands() {
        let cli = Cli::try_parse_from(["proclog", "log", "create"]).unwrap();
        assert!(matches!(cli.command, Commands::Log { command: LogCommands::Create }));

        let cli = Cli::try_parse_from(["proclog", "log", "delete"]).unwrap();
        assert!(matches!(cli.command, Commands::Log { command: LogCommands::Delete }));

        let cli = Cli::try_parse_from(["proclog", "log", "write", "hello world"]).unwrap();
        match cli.command {
            Commands::Log {
                command: LogCommands::Write { message },
            } => assert_eq!(message, "hello world"),
            _ => panic!("Expected log write command"),
        }
    }

    #[test]
    fn test_now_defaults() {
        let cli = Cli::try_parse_from(["proclog", "now"]).unwrap();
        match cli.command {
            Commands::Now { date, time, order } => {
                assert!(date.is_none());
                assert!(time.is_none());
                assert!(order.is_none());
            }
            _ => panic!("Expected now command"),
        }
    }

    #[test]
    fn test_now_layouts() {
        let cli = Cli::try_parse_from([
            "proclog",
            "now",
            "--date",
            "day-first-underscored",
            "--time",
            "colon",
            "--order",
            "spaced",
        ])
        .unwrap();
        match cli.command {
            Commands::Now { date, time, order } => {
                assert_eq!(date, Some(DateFormat::DayFirstUnderscored));
                assert_eq!(time, Some(TimeFormat::Colon));
                assert_eq!(order, Some(Order::Spaced));
            }
            _ => panic!("Expected now command"),
        }
    }

    #[test]
    fn test_now_rejects_unknown_layout() {
        assert!(Cli::try_parse_from(["proclog", "now", "--date", "iso"]).is_err());
    }

    #[test]
    fn test_help_works() {
        // Verify help doesn't panic
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["proclog", "--version"]);
        // Version flag causes early exit with error (expected)
        assert!(result.is_err());
    }
}
