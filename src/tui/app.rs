// TUI application state
//
// Owns the form state, the line editor for the URL field, and the plumbing
// that runs backend requests on background tasks. Completions come back on
// an mpsc channel drained by the event loop.

use super::input::LineEditor;
use super::theme::Theme;
use crate::api::{ApiError, Backend};
use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::form::{Completion, FormState, Request};
use crate::logging::LogBuffer;
use crossterm::event::KeyCode;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Braille spinner shown while a request is in flight
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main application state for the TUI
pub struct App<B> {
    /// Input, result, status message, in-flight flag
    pub form: FormState,

    /// Cursor for the URL field
    pub editor: LineEditor,

    /// Backend base URL (shown in the title bar)
    pub api_url: String,

    pub theme: Theme,

    /// Log buffer for the logs panel
    pub log_buffer: LogBuffer,

    /// Whether the logs panel is visible
    pub show_logs: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Animation frame counter for the spinner
    animation_frame: usize,

    backend: Arc<B>,
    clipboard: SystemClipboard,
    completions: mpsc::Sender<Completion>,
}

impl<B: Backend + 'static> App<B> {
    pub fn new(
        backend: Arc<B>,
        config: &Config,
        log_buffer: LogBuffer,
        completions: mpsc::Sender<Completion>,
    ) -> Self {
        Self {
            form: FormState::new(),
            editor: LineEditor::new(),
            api_url: config.api_url.clone(),
            theme: Theme::by_name(&config.theme),
            log_buffer,
            show_logs: config.show_logs,
            should_quit: false,
            animation_frame: 0,
            backend,
            clipboard: SystemClipboard::new(),
            completions,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Form operations
    // ─────────────────────────────────────────────────────────────────────

    /// Submit the current input
    ///
    /// Ignored while a request is in flight. A blank input still goes
    /// through the form so the validation message shows.
    pub fn submit(&mut self) {
        if self.form.in_flight {
            return;
        }
        if let Some(request) = self.form.begin_submit() {
            self.dispatch(request);
        }
    }

    /// Delete the current result
    pub fn delete(&mut self) {
        if self.form.in_flight {
            return;
        }
        if let Some(request) = self.form.begin_delete() {
            self.dispatch(request);
        }
    }

    /// Copy the current result (only offered when there is one)
    pub fn copy(&mut self) {
        if self.form.in_flight || !self.form.has_result() {
            return;
        }
        self.form.copy_result(&mut self.clipboard);
    }

    /// Reconcile a finished request
    pub fn complete(&mut self, completion: Completion) {
        self.form.complete(completion);
        self.editor.clamp(&self.form.input);
    }

    /// Send `request` on a background task; its completion arrives on the channel
    ///
    /// The request runs in its own task so a panic inside it still produces
    /// a completion and the in-flight flag gets released.
    fn dispatch(&self, request: Request) {
        let backend = Arc::clone(&self.backend);
        let completions = self.completions.clone();
        let operation = request.operation();
        tracing::debug!("Dispatching {:?}", request);

        tokio::spawn(async move {
            let task = tokio::spawn(async move { request.send(backend.as_ref()).await });
            let completion = match task.await {
                Ok(completion) => completion,
                Err(e) => {
                    tracing::error!("{:?} request task failed: {}", operation, e);
                    Completion::Failed {
                        operation,
                        error: ApiError::Transport(e.to_string()),
                    }
                }
            };
            if completions.send(completion).await.is_err() {
                tracing::debug!("TUI closed before {:?} completed", operation);
            }
        });
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input field
    // ─────────────────────────────────────────────────────────────────────

    /// Apply an editing key to the URL field (disabled while in flight)
    pub fn edit(&mut self, key: KeyCode) -> bool {
        if self.form.in_flight {
            return false;
        }
        self.editor.handle_key(key, &mut self.form.input)
    }

    pub fn paste(&mut self, text: &str) {
        if self.form.in_flight {
            return;
        }
        self.editor.insert_str(&mut self.form.input, text);
    }

    pub fn clear_input(&mut self) {
        if self.form.in_flight {
            return;
        }
        self.editor.clear(&mut self.form.input);
    }
}

impl<B> App<B> {
    // ─────────────────────────────────────────────────────────────────────
    // Display
    // ─────────────────────────────────────────────────────────────────────

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    /// Advance the spinner (called on every tick)
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.animation_frame % SPINNER_FRAMES.len()]
    }
}
