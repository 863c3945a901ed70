use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub message_area: Rect,
    pub input_box: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Vertical: messages | input line | status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Messages
            Constraint::Length(1), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    AppLayout {
        message_area: chunks[0],
        input_box: chunks[1],
        status_bar: chunks[2],
    }
}
