/// Single-line text input used by the form fields
///
/// The cursor is a character index, not a byte index, so multi-byte input
/// like "café" edits correctly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    text: String,
    cursor: usize,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_string(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        // Newlines are not allowed in single-line fields
        if ch == '\n' || ch == '\r' {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    /// Backspace: delete the character before the cursor
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    /// Delete: remove the character under the cursor
    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Visible slice and cursor column for a field `width` cells wide
    pub fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let scroll = self.cursor.saturating_sub(width.saturating_sub(1));
        let shown: String = self.text.chars().skip(scroll).take(width).collect();
        (shown, self.cursor - scroll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_the_cursor() {
        let mut editor = Editor::from_string("caf");
        editor.insert_char('é');
        assert_eq!(editor.text(), "café");
        editor.move_cursor_home();
        editor.insert_char('>');
        assert_eq!(editor.text(), ">café");
        editor.move_cursor_end();
        editor.delete_char();
        assert_eq!(editor.text(), ">caf");
        editor.move_cursor_home();
        editor.delete_forward();
        assert_eq!(editor.text(), "caf");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn ignores_newlines_and_reports_blank() {
        let mut editor = Editor::new();
        editor.insert_char('\n');
        editor.insert_char(' ');
        assert_eq!(editor.text(), " ");
        assert!(editor.is_blank());
    }

    #[test]
    fn visible_window_follows_the_cursor() {
        let editor = Editor::from_string("abcdefgh");
        let (shown, col) = editor.visible(4);
        assert_eq!(shown, "fgh");
        assert_eq!(col, 3);

        let mut editor = Editor::from_string("abcdefgh");
        editor.move_cursor_home();
        assert_eq!(editor.visible(4), ("abcd".to_string(), 0));
    }
}
