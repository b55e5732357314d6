//! Command-line entry point for site deletion
//!
//! Loads the config, opens the local store, asks the user to retype the
//! site address and runs the deletion.

mod cli;
mod prompt;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use site_deletion_app::adapters::SqliteStore;
use site_deletion_app::{AppConfig, AppStateBuilder};
use site_deletion_core::types::DeletionOutcome;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the prompt and the outcome
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let args = Cli::parse();

    match run(args).await {
        Ok(DeletionOutcome::Deleted) => {
            println!("Site deleted.");
            ExitCode::SUCCESS
        }
        Ok(DeletionOutcome::Failed(failure)) => {
            println!("{}", failure.reason());
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> anyhow::Result<DeletionOutcome> {
    let config_path = args.config_path();
    let mut config = AppConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Some(database) = args.database.clone() {
        config.database_path = database;
    } else if config.database_path == AppConfig::default().database_path {
        config.database_path = cli::default_database_path();
    }
    tracing::info!("Using database {}", config.database_path.display());

    let store = Arc::new(
        SqliteStore::new(&config.database_path)
            .await
            .context("Failed to open local store")?,
    );
    let state = AppStateBuilder::new()
        .sqlite_store(store)
        .config(config)
        .build()
        .context("Failed to initialize")?;

    let mut gate = state.open_confirmation(args.site_id).await?;
    let expected = gate
        .state()
        .map(|s| s.expected_value().to_string())
        .unwrap_or_default();

    let typed = match args.confirm {
        Some(text) => text,
        None => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            prompt::ask(&mut input, &mut output, &expected).context("Failed to read confirmation")?
        }
    };

    if !gate.update_input(typed)? {
        gate.cancel()?;
        anyhow::bail!("Confirmation did not match {expected}; nothing was deleted");
    }

    let intent = gate.confirm()?;
    Ok(state.delete_confirmed(intent).await)
}
