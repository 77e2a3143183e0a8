//! `substation-tui`: terminal operator dashboard for a simulated substation.
//!
//! Built on [ratatui](https://ratatui.rs). Four views are navigable via
//! number keys (1-4): Live Data, Trend Analysis, Manual Control and Reports.
//! All telemetry is synthetic; nothing here talks to real equipment.
//!
//! Logs are written to a file (default `/tmp/substation-tui.log`) to avoid
//! corrupting the terminal UI. While Live Data is on screen a background
//! feed task pushes a fresh frame into the TUI action loop every refresh.
//!
//! Entry point: CLI argument parsing, config loading, tracing setup, panic
//! hooks, and app launch (or a headless subcommand).

mod action;
mod app;
mod component;
mod event;
mod live_feed;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use substation_config::Config;

use crate::app::{App, AppOptions};

/// Operator dashboard for a simulated electrical substation.
#[derive(Parser, Debug)]
#[command(name = "substation-tui", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir's substation.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Log file path (overrides config; default /tmp/substation-tui.log)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Live Data refresh interval in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    refresh_secs: Option<u64>,

    /// Directory generated reports are written to
    #[arg(long, global = true)]
    report_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one PDF report without starting the dashboard
    Report {
        /// Report date, YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Output directory (overrides --report-dir and config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    /// Load config from file and environment, then apply CLI overrides.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => substation_config::load_config_from(path)?,
            None => substation_config::load_config()?,
        };
        if let Some(secs) = self.refresh_secs {
            config.refresh_secs = secs;
        }
        if let Some(dir) = &self.report_dir {
            config.report_dir.clone_from(dir);
        }
        if let Some(file) = &self.log_file {
            config.log_file.clone_from(file);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr: that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(log_file: &Path, verbose: u8) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "substation_tui={log_level},substation_core={log_level},substation_config={log_level}"
        ))
    });

    let log_dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("substation-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Headless `report` subcommand: write one report and print its path.
fn run_report(config: &Config, date: Option<NaiveDate>, out_dir: Option<PathBuf>) -> Result<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let dir = out_dir.unwrap_or_else(|| config.report_dir.clone());
    let path = substation_core::write_report(&dir, date)?;
    println!("{}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    // Tracing to file: hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&config.log_file, cli.verbose);

    match cli.command {
        Some(Command::Report { date, out_dir }) => {
            color_eyre::install()?;
            info!(?date, "generating report headlessly");
            run_report(&config, date, out_dir)
        }
        Some(Command::Config) => {
            color_eyre::install()?;
            let source = cli
                .config
                .clone()
                .unwrap_or_else(substation_config::config_path);
            println!("# {}", source.display());
            print!("{}", config.to_toml()?);
            Ok(())
        }
        None => {
            // Install panic/error hooks BEFORE entering the terminal
            tui::install_hooks()?;

            info!(
                refresh_secs = config.refresh_secs,
                report_dir = %config.report_dir.display(),
                "starting substation-tui"
            );

            let mut app = App::new(AppOptions {
                refresh: config.refresh_interval(),
                report_dir: config.report_dir,
            });
            app.run().await
        }
    }
}
