// Single-line text editing for the URL field
//
// The text itself lives in `FormState::input`; this only tracks the cursor
// (as a char index) and applies edits to whatever string it is handed. The
// form may clear the text behind our back, so every operation clamps first.

use crossterm::event::KeyCode;
use unicode_width::UnicodeWidthStr;

/// Cursor for a single-line text field
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    /// Cursor position in chars (0 = before first char)
    cursor: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Keep the cursor inside `text`
    pub fn clamp(&mut self, text: &str) {
        self.cursor = self.cursor.min(text.chars().count());
    }

    /// Byte offset of the cursor in `text`
    fn byte_index(&self, text: &str) -> usize {
        text.char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    }

    /// Terminal columns between the start of `text` and the cursor
    pub fn display_offset(&self, text: &str) -> usize {
        let end = self.byte_index(text);
        text[..end].width()
    }

    pub fn insert(&mut self, text: &mut String, c: char) {
        self.clamp(text);
        let at = self.byte_index(text);
        text.insert(at, c);
        self.cursor += 1;
    }

    /// Insert pasted text, dropping line breaks
    pub fn insert_str(&mut self, text: &mut String, pasted: &str) {
        self.clamp(text);
        let cleaned: String = pasted.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        let at = self.byte_index(text);
        text.insert_str(at, &cleaned);
        self.cursor += cleaned.chars().count();
    }

    pub fn backspace(&mut self, text: &mut String) {
        self.clamp(text);
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(text);
        text.remove(at);
    }

    pub fn delete(&mut self, text: &mut String) {
        self.clamp(text);
        if self.cursor < text.chars().count() {
            let at = self.byte_index(text);
            text.remove(at);
        }
    }

    pub fn clear(&mut self, text: &mut String) {
        text.clear();
        self.cursor = 0;
    }

    /// Apply an editing/navigation key. Returns true if the key was used.
    pub fn handle_key(&mut self, key: KeyCode, text: &mut String) -> bool {
        self.clamp(text);
        match key {
            KeyCode::Char(c) => self.insert(text, c),
            KeyCode::Backspace => self.backspace(text),
            KeyCode::Delete => self.delete(text),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(text.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = text.chars().count(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut LineEditor, text: &mut String, s: &str) {
        for c in s.chars() {
            editor.insert(text, c);
        }
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut editor = LineEditor::new();
        let mut text = String::new();

        type_str(&mut editor, &mut text, "https://x.io");
        editor.handle_key(KeyCode::Home, &mut text);
        type_str(&mut editor, &mut text, ">");

        assert_eq!(text, ">https://x.io");
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn backspace_and_delete_respect_char_boundaries() {
        let mut editor = LineEditor::new();
        let mut text = String::new();
        type_str(&mut editor, &mut text, "añb");

        editor.handle_key(KeyCode::Left, &mut text);
        editor.backspace(&mut text);
        assert_eq!(text, "ab");
        assert_eq!(editor.cursor(), 1);

        editor.delete(&mut text);
        assert_eq!(text, "a");

        editor.delete(&mut text);
        editor.handle_key(KeyCode::Home, &mut text);
        editor.backspace(&mut text);
        assert_eq!(text, "a");
    }

    #[test]
    fn cursor_clamps_when_text_shrinks_elsewhere() {
        let mut editor = LineEditor::new();
        let mut text = String::new();
        type_str(&mut editor, &mut text, "https://example.com");

        // The form clears the input after a successful submit
        text.clear();
        editor.insert(&mut text, 'h');

        assert_eq!(text, "h");
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn paste_drops_newlines() {
        let mut editor = LineEditor::new();
        let mut text = String::new();

        editor.insert_str(&mut text, "https://example.com/a\r\n");

        assert_eq!(text, "https://example.com/a");
        assert_eq!(editor.cursor(), text.chars().count());
    }

    #[test]
    fn display_offset_counts_wide_chars() {
        let mut editor = LineEditor::new();
        let mut text = String::new();
        type_str(&mut editor, &mut text, "日本");

        assert_eq!(editor.display_offset(&text), 4);
        editor.handle_key(KeyCode::Left, &mut text);
        assert_eq!(editor.display_offset(&text), 2);
    }

    #[test]
    fn unhandled_keys_report_false() {
        let mut editor = LineEditor::new();
        let mut text = String::new();
        assert!(!editor.handle_key(KeyCode::Tab, &mut text));
        assert!(editor.handle_key(KeyCode::End, &mut text));
    }
}
