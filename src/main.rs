//! clinic-tui - A terminal patient record manager for a single clinic
//!
//! This is the main entry point for the clinic-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod db;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::db::Database;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "clinic-tui",
    version,
    about = "Patient, visit and followup records for one clinic"
)]
struct Cli {
    /// Replace all data with demonstration patients and visits before starting
    #[arg(long)]
    demo_data: bool,

    /// SQLite database file (overrides config and CLINIC_TUI_DB)
    #[arg(long, value_name = "PATH")]
    db: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default();
    if let Some(path) = cli.db {
        config.database_path = path;
    }

    init_logging(&config);
    if let Err(e) = Config::ensure_saved() {
        tracing::warn!(error = %e, "could not write default config");
    }

    let db = Database::open(&config.database_path)
        .with_context(|| format!("opening database {}", config.database_path))?;
    if cli.demo_data {
        let summary = services::seed_demo_data(&db).context("seeding demo data")?;
        tracing::info!(
            patients = summary.patients,
            visits = summary.visits,
            "demo data loaded"
        );
    }

    // Setup terminal
    let mut tui = Tui::new()?;
    tui.enter()?;

    let mut app = App::new(db, config);

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = %err, "exiting after error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("clinic-tui exited");
    Ok(())
}

/// Log to a file next to the config; the terminal belongs to the UI.
/// If the log file cannot be opened, events are discarded.
fn init_logging(config: &Config) {
    let log_path = Config::log_path();
    let (writer, open_error) = match open_log_file(&log_path) {
        Ok(file) => (Box::new(file) as Box<dyn io::Write + Send>, None),
        Err(e) => (Box::new(io::sink()) as Box<dyn io::Write + Send>, Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(Mutex::new(writer))
        .with_ansi(false)
        .init();

    if let Some(e) = open_error {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    tracing::info!(
        database = %config.database_path,
        "clinic-tui starting"
    );
}

fn open_log_file(log_path: &Path) -> Result<File> {
    if let Some(dir) = log_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        // Convert event to action
        let action = match tui.next_event()? {
            Event::Key(key) => app.handle_key_event(key)?,
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            _ => None,
        };

        // Action might produce a follow-up action
        if let Some(action) = action {
            app.dispatch(action)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("clinic-tui.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_reports_unwritable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let err = open_log_file(&blocker.join("clinic-tui.log")).unwrap_err();
        assert!(err.to_string().contains("creating log directory"));
    }
}
