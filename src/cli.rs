// CLI module - command-line argument parsing and handlers
//
// Provides one-shot commands for scripting:
// - shorten <URL> [--copy]: Create a short link and print it
// - delete <SHORT_URL>: Delete a short link (full short URL or bare key)
//
// And subcommands for configuration management:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR
// - config --update: Merge new defaults into existing config

use crate::api::Backend;
use crate::clipboard::SystemClipboard;
use crate::config::{Config, ConfigFileError, VERSION};
use crate::form::{FormState, Shortener, StatusMessage};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitCode};

/// shorturl - Terminal client for a URL-shortening service
#[derive(Parser)]
#[command(name = "shorturl")]
#[command(version = VERSION)]
#[command(about = "Shorten, copy and delete links from the terminal", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides SHORTURL_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Use the line-oriented prompt instead of the TUI
    #[arg(long)]
    pub no_tui: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a short link and print it
    Shorten {
        /// The long URL to shorten
        url: String,

        /// Also copy the short link to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Delete a short link
    Delete {
        /// Short URL as printed by `shorten`, or just its key
        short_url: String,
    },

    /// Manage configuration
    Config(ConfigFlags),
}

#[derive(Args, Debug, Default)]
pub struct ConfigFlags {
    /// Show effective configuration
    #[arg(long)]
    pub show: bool,

    /// Reset config file to defaults
    #[arg(long)]
    pub reset: bool,

    /// Open config file in $EDITOR
    #[arg(long)]
    pub edit: bool,

    /// Update config with new defaults (preserves user values)
    #[arg(long)]
    pub update: bool,

    /// Show config file path
    #[arg(long)]
    pub path: bool,
}

impl Cli {
    /// Apply command-line overrides on top of env/file configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if self.no_tui {
            config.enable_tui = false;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot commands
// ─────────────────────────────────────────────────────────────────────────────

/// `shorturl shorten <URL> [--copy]`
///
/// The short link goes to stdout, the status message to stderr.
pub async fn run_shorten<B: Backend>(backend: B, url: &str, copy: bool) -> ExitCode {
    let mut shortener = Shortener::new(backend);
    shortener.set_input(url);
    shortener.submit().await;

    if let Some(result) = &shortener.state().result {
        println!("{}", result);
        if copy {
            // X11 only serves the selection while we run, so this is best effort
            let mut clipboard = SystemClipboard::new();
            shortener.copy(&mut clipboard);
        }
    }

    report(shortener.state())
}

/// `shorturl delete <SHORT_URL>`
pub async fn run_delete<B: Backend>(backend: B, short_url: &str) -> ExitCode {
    let mut shortener = Shortener::with_result(backend, short_url.trim());
    shortener.delete().await;
    report(shortener.state())
}

/// Print the status message and turn it into an exit status
fn report(state: &FormState) -> ExitCode {
    if let Some(message) = &state.message {
        eprintln!("{}", message);
    }
    if ended_in_error(state) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn ended_in_error(state: &FormState) -> bool {
    state.message.as_ref().is_some_and(StatusMessage::is_error)
}

// ─────────────────────────────────────────────────────────────────────────────
// Config subcommand
// ─────────────────────────────────────────────────────────────────────────────

/// Handle `shorturl config ...`
///
/// Runs before the config file is loaded: only `--show` and `--update` read
/// it, so `--reset`, `--edit` and `--path` still work on a broken file.
pub fn handle_config(flags: ConfigFlags, cli: &Cli) {
    if flags.path {
        handle_config_path();
    } else if flags.show {
        let mut config = Config::from_env();
        cli.apply_overrides(&mut config);
        handle_config_show(&config);
    } else if flags.reset {
        handle_config_reset();
    } else if flags.edit {
        handle_config_edit();
    } else if flags.update {
        handle_config_update();
    } else {
        // No flag provided, show help
        println!("Usage: shorturl config [--show|--reset|--edit|--update|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --update  Update config with new defaults (preserves user values)");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show(config: &Config) {
    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    println!("api_url = {:?}", config.api_url);
    println!("theme = {:?}", config.theme);
    println!("show_logs = {}", config.show_logs);
    println!("enable_tui = {}", config.enable_tui);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!(
        "file_dir = {:?}",
        config.logging.file_dir.display().to_string()
    );
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    match reset_config_file(&path, confirm_overwrite) {
        Ok(true) => println!("Config reset to defaults: {}", path.display()),
        Ok(false) => println!("Aborted."),
        Err(e) => {
            eprintln!("Error writing config: {}", e);
            std::process::exit(1);
        }
    }
}

/// Ask on stderr before replacing an existing file
fn confirm_overwrite(path: &Path) -> bool {
    eprint!(
        "Config file exists at {}. Overwrite? [y/N] ",
        path.display()
    );
    let _ = std::io::stderr().flush();

    let mut input = String::new();
    std::io::stdin().read_line(&mut input).is_ok() && input.trim().eq_ignore_ascii_case("y")
}

/// Replace the file at `path` with defaults; never parses the old contents
///
/// Returns false if `confirm` declined overwriting an existing file.
fn reset_config_file(path: &Path, confirm: impl FnOnce(&Path) -> bool) -> std::io::Result<bool> {
    if path.exists() && !confirm(path) {
        return Ok(false);
    }
    Config::write_defaults(path)?;
    Ok(true)
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}

fn handle_config_update() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
        return;
    }

    let updated = match updated_config_file(&path) {
        Ok(updated) => updated,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Fix the file with `shorturl config --edit` or run `shorturl config --reset`.");
            std::process::exit(1);
        }
    };

    let backup_path = path.with_extension("toml.bak");
    if let Err(e) = std::fs::copy(&path, &backup_path) {
        eprintln!("Warning: Could not create backup: {}", e);
    } else {
        println!("Backup created: {}", backup_path.display());
    }

    if let Err(e) = std::fs::write(&path, updated) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
}

/// The file at `path` re-rendered with the current template
///
/// Only values from the file itself are kept; env overrides are not
/// written back.
fn updated_config_file(path: &Path) -> Result<String, ConfigFileError> {
    let file = Config::read_file_config(path)?;
    Ok(Config::from_file(file).to_toml())
}
