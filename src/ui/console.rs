//! Channel-backed handles between the terminal task and the activities.

use tokio::sync::mpsc;

/// Requests from the activities to the terminal task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Print(String),
    SetPrompt(String),
}

/// One result of waiting for input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C.
    Interrupted,
    /// Ctrl-D on an empty line, or the terminal went away.
    Eof,
}

/// Output sink for display lines and the prompt.
#[derive(Debug, Clone)]
pub struct Console {
    tx: mpsc::UnboundedSender<UiCommand>,
}

impl Console {
    /// Append a line to the scrollback. Dropped if the terminal task is gone.
    pub fn print(&self, line: impl Into<String>) {
        let _ = self.tx.send(UiCommand::Print(line.into()));
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        let _ = self.tx.send(UiCommand::SetPrompt(prompt.into()));
    }
}

/// Source of submitted input lines.
#[derive(Debug)]
pub struct LineReader {
    rx: mpsc::UnboundedReceiver<ReadOutcome>,
}

impl LineReader {
    pub async fn read_line(&mut self) -> ReadOutcome {
        self.rx.recv().await.unwrap_or(ReadOutcome::Eof)
    }
}

/// The terminal task's ends of the two channels.
#[derive(Debug)]
pub struct UiEndpoints {
    pub commands: mpsc::UnboundedReceiver<UiCommand>,
    pub lines: mpsc::UnboundedSender<ReadOutcome>,
}

pub fn channel() -> (Console, LineReader, UiEndpoints) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    (
        Console { tx: command_tx },
        LineReader { rx: line_rx },
        UiEndpoints {
            commands: command_rx,
            lines: line_tx,
        },
    )
}
