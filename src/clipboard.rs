//! System clipboard for the copy operation
//!
//! Uses `arboard` for cross-platform support (Windows, macOS, Linux).
//! The handle is opened on first use and kept, since on X11 the copied text
//! is served by the process that owns it.

use crate::form::Clipboard;
use anyhow::{Context, Result};

/// Platform clipboard, opened lazily
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    /// Common failure cases: no display server (headless Linux), permission denied.
    fn set_text(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().context("Failed to access clipboard")?,
        };
        self.inner
            .insert(clipboard)
            .set_text(text)
            .context("Failed to set clipboard text")?;
        Ok(())
    }
}
