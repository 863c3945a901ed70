use crate::ui::mirc_colors;
use crate::ui::screen::Screen;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, screen: &Screen) {
    let mut spans = mirc_colors::parse_mirc_formatted(&screen.prompt, Theme::input_text());
    let prompt_width: usize = spans.iter().map(|s| s.content.width()).sum();

    let input = &screen.input;
    let before_cursor = input.text[..input.cursor].width();
    let cursor_col = prompt_width + before_cursor;

    // Scroll the line horizontally so the cursor stays visible.
    let width = area.width.max(1) as usize;
    let shift = (cursor_col + 1).saturating_sub(width);

    spans.push(Span::styled(input.text.clone(), Theme::input_text()));
    let paragraph = Paragraph::new(Line::from(spans)).scroll((0, shift as u16));
    frame.render_widget(paragraph, area);

    let cursor_x = area.x + (cursor_col - shift) as u16;
    frame.set_cursor_position((cursor_x, area.y));
}
