//! A simulated shell prompt standing in for a real terminal session.

use crossterm::event::{KeyCode, KeyModifiers};
use modeterm_core::{KeyCombo, Position, TerminalSession};

use super::line::LineBuffer;

const MAX_SCROLLBACK: usize = 500;

/// Readline-ish prompt: one editable input line above a scrollback.
#[derive(Debug, Default)]
pub struct ShellSession {
    prompt: LineBuffer,
    scrollback: Vec<String>,
    keys_received: usize,
}

impl ShellSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> &LineBuffer {
        &self.prompt
    }

    pub fn input(&self) -> &str {
        self.prompt.text()
    }

    pub fn cursor(&self) -> usize {
        self.prompt.cursor()
    }

    pub fn scrollback(&self) -> &[String] {
        &self.scrollback
    }

    pub fn keys_received(&self) -> usize {
        self.keys_received
    }

    fn push_line(&mut self, line: String) {
        if self.scrollback.len() == MAX_SCROLLBACK {
            self.scrollback.remove(0);
        }
        self.scrollback.push(line);
    }

    fn submit(&mut self) {
        let line = self.prompt.take();
        self.push_line(format!("$ {}", line));
        let trimmed = line.trim();
        if trimmed == "echo" {
            self.push_line(String::new());
        } else if let Some(rest) = trimmed.strip_prefix("echo ") {
            self.push_line(rest.trim_start().to_string());
        } else if !trimmed.is_empty() {
            self.push_line(format!("{}: command not found", trimmed));
        }
    }

    fn interrupt(&mut self) {
        let line = self.prompt.take();
        self.push_line(format!("$ {}^C", line));
    }
}

impl TerminalSession for ShellSession {
    fn set_cursor(&mut self, position: Position) {
        self.prompt.set_cursor(position.0);
    }

    fn send_key(&mut self, key: &KeyCombo) {
        self.keys_received += 1;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let cursor = self.prompt.cursor();
        match key.code {
            KeyCode::Char('a') if ctrl => self.prompt.set_cursor(0),
            KeyCode::Char('e') if ctrl => self.prompt.set_cursor(usize::MAX),
            KeyCode::Char('k') if ctrl => self.prompt.kill_line(),
            KeyCode::Char('y') if ctrl => self.prompt.yank(),
            KeyCode::Char('_') if ctrl => {
                self.prompt.undo();
            }
            KeyCode::Char('c') if ctrl => self.interrupt(),
            KeyCode::Char('l') if ctrl => self.scrollback.clear(),
            KeyCode::Char('d') if ctrl => {
                if self.prompt.text().is_empty() {
                    self.push_line("^D".to_string());
                } else {
                    self.prompt.delete_char();
                }
            }
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.prompt.insert_char(ch)
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => self.prompt.insert_char(' '),
            KeyCode::Backspace => self.prompt.backspace(),
            KeyCode::Delete => self.prompt.delete_char(),
            KeyCode::Left => self.prompt.set_cursor(cursor.saturating_sub(1)),
            KeyCode::Right => self.prompt.set_cursor(cursor + 1),
            KeyCode::Home => self.prompt.set_cursor(0),
            KeyCode::End => self.prompt.set_cursor(usize::MAX),
            _ => {}
        }
    }
}
