// Prompt mode - line-oriented surface for terminals without the TUI
//
// Reads stdin one line at a time. A plain line is submitted as the URL;
// lines starting with ':' are commands. Each operation is awaited before the
// next line is read, so only one request is ever in flight.

use crate::api::Backend;
use crate::clipboard::SystemClipboard;
use crate::config::{Config, VERSION};
use crate::form::{FormState, MessageKind, Shortener};
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
}

/// One line of prompt input
#[derive(Debug, PartialEq, Eq)]
enum PromptCommand {
    Submit(String),
    Copy,
    Delete,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl PromptCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Self::Submit(line.to_string());
        };
        match command.trim().to_lowercase().as_str() {
            "copy" | "c" => Self::Copy,
            "delete" | "d" => Self::Delete,
            "show" | "s" => Self::Show,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Run prompt mode until `:quit`, end of input, or Ctrl+C
pub async fn run_prompt<B: Backend>(backend: B, config: &Config) -> Result<()> {
    print_banner(config);

    let mut shortener = Shortener::new(backend);
    tokio::select! {
        result = prompt_loop(&mut shortener) => result,
        // Dropping the loop mid-request still releases the in-flight flag
        _ = tokio::signal::ctrl_c() => {
            println!();
            Ok(())
        }
    }
}

async fn prompt_loop<B: Backend>(shortener: &mut Shortener<B>) -> Result<()> {
    let mut clipboard = SystemClipboard::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}shorturl>{} ", colors::CYAN, colors::RESET);
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from stdin")?
        else {
            // EOF
            println!();
            return Ok(());
        };

        match PromptCommand::parse(&line) {
            PromptCommand::Quit => return Ok(()),
            PromptCommand::Help => print_help(),
            PromptCommand::Show => print_status(shortener.state()),
            PromptCommand::Copy => {
                if shortener.state().has_result() {
                    shortener.copy(&mut clipboard);
                    print_status(shortener.state());
                } else {
                    println!("{}Nothing to copy yet.{}", colors::DIM, colors::RESET);
                }
            }
            PromptCommand::Delete => {
                shortener.delete().await;
                print_status(shortener.state());
            }
            PromptCommand::Submit(url) => {
                shortener.set_input(url);
                shortener.submit().await;
                print_status(shortener.state());
            }
            PromptCommand::Unknown(command) => {
                println!("Unknown command ':{}' (try :help)", command);
            }
        }
    }
}

fn print_banner(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}shorturl{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Backend:{RESET} {}", config.api_url);
    println!("  {DIM}Paste a URL and press Enter, or :help for commands{RESET}");
    println!();
}

fn print_help() {
    println!("  <url>     Shorten a URL");
    println!("  :copy     Copy the short URL to the clipboard");
    println!("  :delete   Delete the short URL");
    println!("  :show     Show the current short URL and message");
    println!("  :quit     Exit");
}

fn print_status(state: &FormState) {
    for line in status_lines(state) {
        println!("{}", line);
    }
}

/// Message (coloured by kind) followed by the current short URL, if any
fn status_lines(state: &FormState) -> Vec<String> {
    use colors::*;

    let mut lines = Vec::new();
    if let Some(message) = &state.message {
        let color = match message.kind {
            MessageKind::Success => GREEN,
            MessageKind::Error => RED,
            MessageKind::Info => YELLOW,
        };
        lines.push(format!("{color}{}{RESET}", message.text));
    }
    if let Some(result) = &state.result {
        lines.push(format!("{DIM}Short URL:{RESET} {BOLD}{result}{RESET}"));
    }
    lines
}
