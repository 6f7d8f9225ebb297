//! Grimoire - organize Tormenta 20 powers into combat scenarios
//!
//! A terminal catalog with:
//! - Scenarios and skills persisted to a local SQLite database
//! - AI-assisted skill and scenario suggestions
//! - Confirmation before anything is deleted

use anyhow::Result;
use clap::Parser;

use grimoire_core::paths;

mod app;
mod cli;
mod prompt;
mod render;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to file so stdout stays clean for command output
    let log_dir = paths::logs_dir();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory: {}", e);
    }

    #[cfg(unix)]
    let null_device = "/dev/null";
    #[cfg(windows)]
    let null_device = "NUL";

    let log_file = match std::fs::File::create(log_dir.join("grimoire.log")) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "Failed to create log file: {}, falling back to null device",
                e
            );
            std::fs::File::create(null_device)?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let mut app = app::App::open(&cli)?;
    app.run(cli.command).await
}
