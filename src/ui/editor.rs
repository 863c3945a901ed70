//! Input line state and persistent history.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Text being edited, with a byte-offset cursor and history navigation.
#[derive(Debug, Default)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
    pub history: Vec<String>,
    pub history_index: Option<usize>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: Vec<String>) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.next_boundary();
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.text.len())
    }

    /// Take the line for submission. Non-empty lines are added to history.
    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.history_index = None;
        if !text.is_empty() {
            self.history.push(text.clone());
        }
        text
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let idx = match self.history_index {
            Some(i) if i > 0 => i - 1,
            Some(_) => return,
            None => self.history.len() - 1,
        };
        self.history_index = Some(idx);
        self.text = self.history[idx].clone();
        self.cursor = self.text.len();
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => {
                let idx = i + 1;
                self.history_index = Some(idx);
                self.text = self.history[idx].clone();
                self.cursor = self.text.len();
            }
            Some(_) => {
                self.history_index = None;
                self.text.clear();
                self.cursor = 0;
            }
            None => {}
        }
    }

    pub fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut pos = self.cursor;
        // Skip trailing whitespace
        while pos > 0 && self.text.as_bytes().get(pos - 1) == Some(&b' ') {
            pos -= 1;
        }
        // Skip word characters
        while pos > 0 && self.text.as_bytes().get(pos - 1) != Some(&b' ') {
            pos -= 1;
        }
        self.text.drain(pos..self.cursor);
        self.cursor = pos;
    }
}

/// Append-only history file, one entry per line.
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The last `limit` entries. A missing file is an empty history.
    pub fn load(&self, limit: usize) -> Result<Vec<String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read history from {}", self.path.display())
                })
            }
        };
        let entries: Vec<String> = contents
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        let skip = entries.len().saturating_sub(limit);
        Ok(entries.into_iter().skip(skip).collect())
    }

    /// Start the task that appends recorded entries. It ends once every
    /// [`HistoryRecorder`] is dropped and the queued entries are written.
    pub fn spawn_recorder(&self) -> (HistoryRecorder, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(append_entries(self.path.clone(), rx));
        (HistoryRecorder { tx }, task)
    }
}

/// Queues submitted lines for the history file.
#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    tx: mpsc::UnboundedSender<String>,
}

impl HistoryRecorder {
    pub fn record(&self, entry: &str) {
        if entry.is_empty() {
            return;
        }
        let _ = self.tx.send(entry.to_string());
    }
}

async fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open history file {}", path.display()))
}

/// Write entries as they arrive, keeping one handle open. Failures are logged
/// and the file is reopened for the next entry.
async fn append_entries(path: PathBuf, mut rx: mpsc::UnboundedReceiver<String>) {
    let mut file: Option<File> = None;
    while let Some(entry) = rx.recv().await {
        if file.is_none() {
            match open_append(&path).await {
                Ok(opened) => file = Some(opened),
                Err(e) => {
                    warn!("history not saved: {e:#}");
                    continue;
                }
            }
        }
        if let Some(handle) = file.as_mut() {
            let line = format!("{entry}\n");
            let written = match handle.write_all(line.as_bytes()).await {
                Ok(()) => handle.flush().await,
                Err(e) => Err(e),
            };
            if let Err(e) = written {
                warn!("history not saved: {e}");
                file = None;
            }
        }
    }
}
