//! State owned by the terminal task: scrollback, prompt and the input line.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;

use super::console::{ReadOutcome, UiCommand};
use super::editor::{HistoryFile, HistoryRecorder, InputState};

/// Lines moved per PageUp/PageDown.
const SCROLL_STEP: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollbackLine {
    pub timestamp: String,
    pub text: String,
}

/// Bounded list of display lines. `scroll_offset` counts lines hidden below
/// the view; 0 follows the newest line.
#[derive(Debug)]
pub struct Scrollback {
    pub lines: VecDeque<ScrollbackLine>,
    pub scroll_offset: usize,
    max_lines: usize,
    timestamp_format: String,
}

impl Scrollback {
    pub fn new(max_lines: usize, timestamp_format: impl Into<String>) -> Self {
        Self {
            lines: VecDeque::new(),
            scroll_offset: 0,
            max_lines: max_lines.max(1),
            timestamp_format: timestamp_format.into(),
        }
    }

    pub fn push(&mut self, text: String) {
        let timestamp = if self.timestamp_format.is_empty() {
            String::new()
        } else {
            Local::now().format(&self.timestamp_format).to_string()
        };
        self.lines.push_back(ScrollbackLine { timestamp, text });
        if self.scroll_offset > 0 {
            // Keep the viewed lines in place while scrolled back.
            self.scroll_offset += 1;
        }
        if self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = (self.scroll_offset + SCROLL_STEP).min(self.max_scroll());
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(SCROLL_STEP);
    }
}

/// Everything the terminal task draws.
#[derive(Debug)]
pub struct Screen {
    pub scrollback: Scrollback,
    pub input: InputState,
    pub prompt: String,
    /// `host:port` shown in the status bar.
    pub server_label: String,
    history: Option<HistoryRecorder>,
}

impl Screen {
    pub fn new(scrollback: Scrollback, server_label: impl Into<String>) -> Self {
        Self {
            scrollback,
            input: InputState::new(),
            prompt: String::new(),
            server_label: server_label.into(),
            history: None,
        }
    }

    /// Seed the input history from `file`; submitted lines go to `recorder`.
    pub fn with_history(
        mut self,
        file: &HistoryFile,
        limit: usize,
        recorder: HistoryRecorder,
    ) -> Self {
        match file.load(limit) {
            Ok(entries) => self.input = InputState::with_history(entries),
            Err(e) => self.scrollback.push(format!("-!- {e:#}")),
        }
        self.history = Some(recorder);
        self
    }

    pub fn apply(&mut self, command: UiCommand) {
        match command {
            UiCommand::Print(line) => self.scrollback.push(line),
            UiCommand::SetPrompt(prompt) => self.prompt = prompt,
        }
    }

    /// Apply one key press. Returns what the reader should see, if anything.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ReadOutcome> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char(c) = key.code {
                match c {
                    'c' => return Some(ReadOutcome::Interrupted),
                    'd' if self.input.text.is_empty() => return Some(ReadOutcome::Eof),
                    'd' => self.input.delete_forward(),
                    'a' => self.input.move_home(),
                    'e' => self.input.move_end(),
                    'w' => self.input.delete_word_back(),
                    'u' => {
                        self.input.text.clear();
                        self.input.cursor = 0;
                    }
                    _ => {}
                }
                return None;
            }
        }

        match key.code {
            KeyCode::Enter => {
                let line = self.input.take_text();
                if let Some(history) = &self.history {
                    history.record(&line);
                }
                self.scrollback.scroll_offset = 0;
                return Some(ReadOutcome::Line(line));
            }
            KeyCode::Backspace => {
                if key.modifiers.contains(KeyModifiers::ALT) {
                    self.input.delete_word_back();
                } else {
                    self.input.delete_back();
                }
            }
            KeyCode::Delete => self.input.delete_forward(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Up => self.input.history_up(),
            KeyCode::Down => self.input.history_down(),
            KeyCode::PageUp => self.scrollback.scroll_up(),
            KeyCode::PageDown => self.scrollback.scroll_down(),
            KeyCode::Char(c) => self.input.insert_char(c),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn screen() -> Screen {
        Screen::new(Scrollback::new(100, ""), "irc.example.net:6667")
    }

    #[test]
    fn test_scrollback_is_bounded() {
        let mut scrollback = Scrollback::new(3, "");
        for i in 0..5 {
            scrollback.push(format!("line {i}"));
        }
        let texts: Vec<_> = scrollback.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["line 2", "line 3", "line 4"]);
        assert_eq!(scrollback.lines[0].timestamp, "");
    }

    #[test]
    fn test_scrolled_view_stays_put() {
        let mut scrollback = Scrollback::new(100, "%H:%M");
        for i in 0..20 {
            scrollback.push(format!("line {i}"));
        }
        scrollback.scroll_up();
        assert_eq!(scrollback.scroll_offset, 5);
        scrollback.push("new".into());
        assert_eq!(scrollback.scroll_offset, 6);
        scrollback.scroll_down();
        scrollback.scroll_down();
        assert_eq!(scrollback.scroll_offset, 0);
        assert_eq!(scrollback.lines[0].timestamp.len(), 5);
    }

    #[test]
    fn test_typing_and_submit() {
        let mut screen = screen();
        for c in "hi".chars() {
            assert_eq!(screen.handle_key(key(KeyCode::Char(c))), None);
        }
        assert_eq!(
            screen.handle_key(key(KeyCode::Enter)),
            Some(ReadOutcome::Line("hi".into()))
        );
        assert_eq!(screen.input.text, "");
        assert_eq!(
            screen.handle_key(key(KeyCode::Enter)),
            Some(ReadOutcome::Line(String::new()))
        );
    }

    #[test]
    fn test_interrupt_and_eof() {
        let mut screen = screen();
        assert_eq!(screen.handle_key(ctrl('c')), Some(ReadOutcome::Interrupted));
        screen.handle_key(key(KeyCode::Char('x')));
        assert_eq!(screen.handle_key(ctrl('d')), None);
        assert_eq!(screen.handle_key(ctrl('d')), None);
        assert_eq!(screen.input.text, "x");
        screen.handle_key(key(KeyCode::Home));
        assert_eq!(screen.handle_key(ctrl('d')), None);
        assert_eq!(screen.handle_key(ctrl('d')), Some(ReadOutcome::Eof));
    }

    #[tokio::test]
    async fn test_submitted_lines_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        std::fs::write(&path, "/join #old\n").unwrap();
        let file = HistoryFile::new(&path);
        let (recorder, task) = file.spawn_recorder();

        let mut screen = screen().with_history(&file, 10, recorder);
        screen.handle_key(key(KeyCode::Up));
        assert_eq!(screen.input.text, "/join #old");
        screen.handle_key(key(KeyCode::Enter));
        screen.handle_key(key(KeyCode::Enter));
        drop(screen);
        task.await.unwrap();

        assert_eq!(file.load(10).unwrap(), vec!["/join #old", "/join #old"]);
    }

    #[test]
    fn test_ui_commands() {
        let mut screen = screen();
        screen.apply(UiCommand::SetPrompt("[bob.#x] ".into()));
        screen.apply(UiCommand::Print("hello".into()));
        assert_eq!(screen.prompt, "[bob.#x] ");
        assert_eq!(screen.scrollback.lines.back().unwrap().text, "hello");
    }
}
