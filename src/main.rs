use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use proclog::clock::{Now, Stopwatch, TimeFormat};
use proclog::logstore::{LogRead, LogStore, WriteOutcome};
use proclog::process::{EndReport, Outcome, ProcessController, StartReport};

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, LogCommands};
use config::Config;

fn setup_logging(level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("proclog")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("proclog.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.unwrap_or("info")))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    let mut stopwatch = Stopwatch::new();
    stopwatch.start();

    let log_path = cli.log.clone().unwrap_or_else(|| config.log.path.clone());

    match &cli.command {
        Commands::Start { target } => handle_start_command(target, &log_path, config)?,
        Commands::End { target } => handle_end_command(target, &log_path, config)?,
        Commands::Log { command } => handle_log_command(command, &log_path)?,
        Commands::Now { date, time, order } => {
            let now = Now::new(
                date.unwrap_or(config.timestamp.date),
                time.unwrap_or(config.timestamp.time),
                order.unwrap_or(config.timestamp.order),
            );
            println!("{}", now.date_time());
        }
    }

    if cli.is_verbose() {
        println!("{} {}", "Finished in".dimmed(), stopwatch.stop(TimeFormat::Colon));
    }
    Ok(())
}

/// Make sure the directory holding the outcome log exists
fn ensure_log_dir(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context(format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn handle_start_command(target: &str, log_path: &Path, config: &Config) -> Result<()> {
    info!("Starting task: {}", target);
    ensure_log_dir(log_path)?;

    let mut controller = ProcessController::new(target, log_path)?.with_clock(config.timestamp);
    match controller.start_task().context("Failed to record start outcome")? {
        StartReport::Started(handle) => {
            println!("{} {} (pid {})", "Started:".green(), handle.display_name(), handle.pid)
        }
        StartReport::Failed(message) => println!("{} {}", "Failed:".red(), message),
        StartReport::NotLaunchable(condition) => println!("{} {}", "Skipped:".yellow(), condition),
    }
    Ok(())
}

fn handle_end_command(target: &str, log_path: &Path, config: &Config) -> Result<()> {
    info!("Ending task: {}", target);
    ensure_log_dir(log_path)?;

    let mut controller = ProcessController::new(target, log_path)?.with_clock(config.timestamp);
    match controller.end_task().context("Failed to record end outcome")? {
        EndReport::NotLaunchable(condition) => println!("{} {}", "Skipped:".yellow(), condition),
        EndReport::NotActive(name) => println!("{} {} is not active", "Skipped:".yellow(), name),
        EndReport::Processed(outcomes) => {
            for instance in outcomes {
                match instance.outcome {
                    Outcome::Success => println!(
                        "{} {} (pid {})",
                        "Terminated:".green(),
                        instance.handle.display_name(),
                        instance.handle.pid
                    ),
                    Outcome::Failure(message) => println!(
                        "{} {} (pid {}): {}",
                        "Failed:".red(),
                        instance.handle.display_name(),
                        instance.handle.pid,
                        message
                    ),
                }
            }
        }
    }
    Ok(())
}

fn handle_log_command(command: &LogCommands, log_path: &Path) -> Result<()> {
    info!("Handling log command: {:?}", command);
    let mut store = LogStore::new(log_path)?;

    match command {
        LogCommands::Create => {
            ensure_log_dir(log_path)?;
            let path = store.create().context("Failed to create log")?;
            println!("{} {}", "Log:".green(), path.display());
        }
        LogCommands::Read => match store.read().context("Failed to read log")? {
            LogRead::Lines(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            LogRead::Invalid(condition) => println!("{} {}", "Skipped:".yellow(), condition),
        },
        LogCommands::Write { message } => match store.write(message).context("Failed to write log")? {
            WriteOutcome::Appended => println!("{} {}", "Written:".green(), message),
            WriteOutcome::Skipped(condition) => println!("{} {}", "Skipped:".yellow(), condition),
        },
        LogCommands::Delete => {
            store.delete().context("Failed to delete log")?;
            println!("{} {}", "Deleted:".red(), log_path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with the configured default level
    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
