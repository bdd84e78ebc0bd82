/// Single-line text with a char-indexed cursor, a kill slot and undo.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
    kill: Option<String>,
    undo: Vec<(String, usize)>,
}

const MAX_UNDO_STACK: usize = 100;

impl LineBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.len());
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map_or(self.text.len(), |(idx, _)| idx)
    }

    fn snapshot(&mut self) {
        if self.undo.len() == MAX_UNDO_STACK {
            self.undo.remove(0);
        }
        self.undo.push((self.text.clone(), self.cursor));
    }

    pub fn insert_char(&mut self, ch: char) {
        self.snapshot();
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.snapshot();
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn delete_char(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        self.snapshot();
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    /// Cut from the cursor to the end of the line.
    pub fn kill_line(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        self.snapshot();
        let at = self.byte_index(self.cursor);
        self.kill = Some(self.text.split_off(at));
    }

    pub fn yank(&mut self) {
        let Some(killed) = self.kill.clone() else {
            return;
        };
        self.snapshot();
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, &killed);
        self.cursor += killed.chars().count();
    }

    pub fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some((text, cursor)) => {
                self.text = text;
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }

    /// Empty the line, keeping the kill slot. Undo history starts over.
    pub fn take(&mut self) -> String {
        self.undo.clear();
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Start of the next word after `from`, or the end of the line.
    pub fn word_forward(&self, from: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut idx = from.min(chars.len());
        while idx < chars.len() && !chars[idx].is_whitespace() {
            idx += 1;
        }
        while idx < chars.len() && chars[idx].is_whitespace() {
            idx += 1;
        }
        idx
    }

    /// Start of the word before `from`.
    pub fn word_backward(&self, from: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut idx = from.min(chars.len());
        while idx > 0 && chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        while idx > 0 && !chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> LineBuffer {
        let mut line = LineBuffer::default();
        text.chars().for_each(|ch| line.insert_char(ch));
        line
    }

    #[test]
    fn kill_and_yank_follow_the_cursor() {
        let mut buffer = line("ls -la");
        buffer.set_cursor(2);
        buffer.kill_line();
        assert_eq!(buffer.text(), "ls");

        buffer.set_cursor(0);
        buffer.yank();
        assert_eq!(buffer.text(), " -lals");
        assert_eq!(buffer.cursor(), 4);
    }

    #[test]
    fn undo_restores_text_and_cursor() {
        let mut buffer = line("ab");
        assert!(buffer.undo());
        assert_eq!(buffer.text(), "a");
        assert_eq!(buffer.cursor(), 1);
        buffer.take();
        assert!(!buffer.undo());
    }

    #[test]
    fn cursor_is_counted_in_chars() {
        let mut buffer = line("héllo");
        buffer.set_cursor(42);
        assert_eq!(buffer.cursor(), 5);
        buffer.set_cursor(2);
        buffer.insert_char('X');
        assert_eq!(buffer.text(), "héXllo");
    }

    #[test]
    fn word_motions_skip_whitespace() {
        let buffer = line("git  commit -m");
        assert_eq!(buffer.word_forward(0), 5);
        assert_eq!(buffer.word_forward(5), 12);
        assert_eq!(buffer.word_forward(12), 14);
        assert_eq!(buffer.word_backward(12), 5);
        assert_eq!(buffer.word_backward(5), 0);
    }
}
