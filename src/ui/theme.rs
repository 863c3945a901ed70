use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub fn timestamp() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn message_text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn status_host() -> Style {
        Style::default()
            .fg(Color::Green)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_scrolled() -> Style {
        Style::default().fg(Color::Yellow).bg(Color::DarkGray)
    }

    pub fn scrollbar_thumb() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn scrollbar_track() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
