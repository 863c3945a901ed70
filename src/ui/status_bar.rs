use crate::ui::screen::Screen;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, screen: &Screen) {
    let mut parts: Vec<Span> = vec![Span::styled(
        format!(" {} ", screen.server_label),
        Theme::status_host(),
    )];

    let scrolled = screen.scrollback.scroll_offset;
    let indicator = if scrolled > 0 {
        format!(" -- {scrolled} more below -- ")
    } else {
        String::new()
    };

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + indicator.width());
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    if !indicator.is_empty() {
        parts.push(Span::styled(indicator, Theme::status_scrolled()));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
