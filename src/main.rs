// shorturl - Terminal client for a URL-shortening service
//
// Turns long URLs into short links via a small HTTP backend, copies them to
// the clipboard, and deletes them again.
//
// Architecture:
// - API client (reqwest): POST /shorturl and DELETE /shorturl/<key>
// - Form: transient state (input, result, message, in-flight flag) and the
//   submit/copy/delete operations that drive it
// - Surfaces: TUI (ratatui), line prompt, and one-shot CLI commands
// - Config and logging: layered TOML/env/flags config, tracing subscriber

mod api;
mod cli;
mod clipboard;
mod config;
mod form;
mod logging;
mod prompt;
mod tui;

use anyhow::Result;
use api::ShortUrlClient;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use logging::{LogBuffer, LogSink};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let mut cli = Cli::parse();

    // Config management runs before the file is loaded so a broken file can be repaired
    let command = match cli.command.take() {
        Some(Commands::Config(flags)) => {
            cli::handle_config(flags, &cli);
            return Ok(ExitCode::SUCCESS);
        }
        other => other,
    };

    // Load configuration: flags > env vars > config file > defaults
    let mut config = Config::from_env();
    cli.apply_overrides(&mut config);

    // Create config file on first run so users can discover options
    Config::ensure_config_exists();

    // The TUI owns the terminal, so its logs go to the in-app panel
    let run_tui = command.is_none() && config.enable_tui;
    let log_buffer = LogBuffer::new();
    let sink = if run_tui {
        LogSink::Tui(log_buffer.clone())
    } else {
        LogSink::Stderr
    };

    // Keep the guard alive for the whole run so file logs flush on exit
    let _log_guard = logging::init(&config.logging, sink);

    tracing::debug!("Using backend at {}", config.api_url);
    let client = ShortUrlClient::new(&config.api_url)?;

    let code = match command {
        Some(Commands::Shorten { url, copy }) => cli::run_shorten(client, &url, copy).await,
        Some(Commands::Delete { short_url }) => cli::run_delete(client, &short_url).await,
        _ if run_tui => {
            tracing::info!("Starting TUI");
            if let Err(e) = tui::run_tui(Arc::new(client), &config, log_buffer).await {
                tracing::error!("TUI error: {:?}", e);
                return Err(e);
            }
            ExitCode::SUCCESS
        }
        _ => {
            tracing::debug!("TUI disabled, running prompt mode");
            prompt::run_prompt(client, &config).await?;
            ExitCode::SUCCESS
        }
    };

    tracing::debug!("Shutting down");
    Ok(code)
}
