//! CLI module for proclog - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for process control, log
//! maintenance and date/time printing.

pub mod commands;

pub use commands::Cli;
