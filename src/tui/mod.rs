// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, paste, timer ticks)
// - Rendering the form
// - Receiving request completions and reconciling them into the form

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

use crate::api::Backend;
use crate::config::Config;
use crate::form::Completion;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal.
pub async fn run_tui<B: Backend + 'static>(
    backend: Arc<B>,
    config: &Config,
    log_buffer: LogBuffer,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to setup terminal")?;
    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term).context("Failed to create terminal")?;

    // Completions from request tasks; one request at a time, so little buffering
    let (completion_tx, mut completion_rx) = mpsc::channel(4);
    let mut app = App::new(backend, config, log_buffer, completion_tx);

    let result = run_event_loop(&mut terminal, &mut app, &mut completion_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Terminal input (keys, paste)
/// 2. Timer ticks (spinner animation, log panel refresh)
/// 3. Completions of in-flight requests
async fn run_event_loop<B: Backend + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<B>,
    completion_rx: &mut mpsc::Receiver<Completion>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Terminal input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Paste(text)) => app.paste(&text),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            // Request completions
            Some(completion) = completion_rx.recv() => {
                app.complete(completion);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
///
/// Quit and the logs toggle always work; everything else is ignored while
/// a request is in flight (the App methods check the flag).
fn handle_key_event<B: Backend + 'static>(app: &mut App<B>, key_event: KeyEvent) {
    // Some terminals report Release/Repeat; only act on presses
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('l') if ctrl => app.toggle_logs(),
        KeyCode::Char('y') if ctrl => app.copy(),
        KeyCode::Char('d') if ctrl => app.delete(),
        KeyCode::Char('u') if ctrl => app.clear_input(),
        KeyCode::Enter => app.submit(),
        // Other control/alt chords are not text
        KeyCode::Char(_) if ctrl || key_event.modifiers.contains(KeyModifiers::ALT) => {}
        code => {
            app.edit(code);
        }
    }
}
