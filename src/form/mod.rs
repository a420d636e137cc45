//! Shortening form state and the operations that drive it
//!
//! `FormState` holds the four pieces of transient state (input, result,
//! status message, in-flight flag). Every transition is a plain method on it
//! so surfaces can drive the form without a terminal or a network:
//!
//! ```text
//! begin_submit / begin_delete  ->  Request  ->  Request::send(backend)  ->  Completion  ->  complete
//! ```
//!
//! `Shortener` bundles a state with a `Backend` for callers that can simply
//! await each operation (prompt mode, one-shot CLI commands). The TUI keeps
//! its own `FormState` and sends requests on spawned tasks instead.
//!
//! Nothing here enforces "one operation at a time"; surfaces check
//! `can_submit` / `has_result` before triggering.

use crate::api::{key_from_short_url, ApiError, Backend};

mod messages;


pub use messages::{MessageKind, StatusMessage};

/// Clipboard abstraction for the copy operation
///
/// `clipboard::SystemClipboard` is the real one.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Which backend operation a request/completion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Delete,
}

/// A backend call the form wants made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Create { url: String },
    Delete { key: String },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::Create { .. } => Operation::Create,
            Request::Delete { .. } => Operation::Delete,
        }
    }

    /// Perform the call against `backend`
    ///
    /// Never fails: errors come back as `Completion::Failed`.
    pub async fn send<B: Backend>(self, backend: &B) -> Completion {
        match self {
            Request::Create { url } => match backend.create(&url).await {
                Ok(short_url) => Completion::Created { short_url },
                Err(error) => Completion::Failed {
                    operation: Operation::Create,
                    error,
                },
            },
            Request::Delete { key } => match backend.delete(&key).await {
                Ok(()) => Completion::Deleted { key },
                Err(error) => Completion::Failed {
                    operation: Operation::Delete,
                    error,
                },
            },
        }
    }
}

/// Outcome of a `Request`, fed back into `FormState::complete`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Created { short_url: String },
    Deleted { key: String },
    Failed { operation: Operation, error: ApiError },
}

/// Transient form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Text the user typed (candidate long URL)
    pub input: String,

    /// Short link returned by the last successful create
    pub result: Option<String>,

    /// Last status message shown to the user
    pub message: Option<StatusMessage>,

    /// Set while a backend call is outstanding
    pub in_flight: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Whether a submit trigger should be offered
    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.input.trim().is_empty()
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// Start a submit: clears result and message, validates the input
    ///
    /// Returns the request to send, or `None` when the input is blank (the
    /// validation message is set and the flag stays clear).
    pub fn begin_submit(&mut self) -> Option<Request> {
        self.message = None;
        self.result = None;

        let url = self.input.trim();
        if url.is_empty() {
            self.message = Some(StatusMessage::empty_input());
            self.in_flight = false;
            return None;
        }

        let request = Request::Create {
            url: url.to_string(),
        };
        self.in_flight = true;
        Some(request)
    }

    /// Start a delete of the current result
    ///
    /// Returns `None` (with an informational message) when there is nothing
    /// to delete.
    pub fn begin_delete(&mut self) -> Option<Request> {
        self.message = None;

        let Some(key) = self.result.as_deref().and_then(key_from_short_url) else {
            self.message = Some(StatusMessage::nothing_to_delete());
            self.in_flight = false;
            return None;
        };

        let request = Request::Delete {
            key: key.to_string(),
        };
        self.in_flight = true;
        Some(request)
    }

    /// Reconcile a finished request into state; always clears the in-flight flag
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Created { short_url } => {
                self.result = Some(short_url);
                self.message = Some(StatusMessage::created());
                self.input.clear();
            }
            Completion::Deleted { key } => {
                self.message = Some(StatusMessage::deleted(&key));
                self.result = None;
                self.input.clear();
            }
            Completion::Failed { operation, error } => {
                self.message = Some(StatusMessage::failed(operation, &error));
            }
        }
        self.in_flight = false;
    }

    /// Copy the current result to `clipboard`
    ///
    /// Best effort: the confirmation is shown on every attempt and a clipboard
    /// failure is only logged. No-op without a result.
    pub fn copy_result<C: Clipboard + ?Sized>(&mut self, clipboard: &mut C) {
        let Some(result) = self.result.as_deref() else {
            return;
        };

        if let Err(e) = clipboard.set_text(result) {
            tracing::warn!("Clipboard copy failed: {:#}", e);
        } else {
            tracing::debug!("Copied {} to clipboard", result);
        }
        self.message = Some(StatusMessage::copied());
    }
}

/// Holds the in-flight flag for the duration of one awaited call
///
/// Dropping the guard clears the flag, so it is released even when the
/// awaiting future is dropped before the response arrives.
struct InFlight<'a> {
    state: &'a mut FormState,
}

impl<'a> InFlight<'a> {
    fn hold(state: &'a mut FormState) -> Self {
        state.in_flight = true;
        Self { state }
    }

    fn finish(self, completion: Completion) {
        self.state.complete(completion);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.in_flight = false;
    }
}

/// Form state bound to a backend
pub struct Shortener<B> {
    backend: B,
    state: FormState,
}

impl<B: Backend> Shortener<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: FormState::new(),
        }
    }

    /// Start from a short link created earlier (e.g. one given on the command line)
    pub fn with_result(backend: B, short_url: impl Into<String>) -> Self {
        let mut shortener = Self::new(backend);
        shortener.state.result = Some(short_url.into());
        shortener
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text);
    }

    /// Create a short link for the current input
    pub async fn submit(&mut self) {
        let Some(request) = self.state.begin_submit() else {
            return;
        };
        self.run(request).await;
    }

    /// Delete the current result
    pub async fn delete(&mut self) {
        let Some(request) = self.state.begin_delete() else {
            return;
        };
        self.run(request).await;
    }

    /// Copy the current result to `clipboard`
    pub fn copy<C: Clipboard + ?Sized>(&mut self, clipboard: &mut C) {
        self.state.copy_result(clipboard);
    }

    async fn run(&mut self, request: Request) {
        let guard = InFlight::hold(&mut self.state);
        let completion = request.send(&self.backend).await;
        guard.finish(completion);
    }
}
