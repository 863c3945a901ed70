use crate::ui::mirc_colors;
use crate::ui::screen::{Scrollback, ScrollbackLine};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap};

pub fn render(frame: &mut Frame, area: Rect, scrollback: &Scrollback) {
    let available_height = area.height as usize;
    let total = scrollback.lines.len();

    // Walk back from the bottom of the view until the rows are filled.
    let end = total.saturating_sub(scrollback.scroll_offset);
    let mut lines: Vec<Line> = Vec::new();
    let mut rows = 0;
    for line in scrollback.lines.iter().take(end).rev() {
        if rows >= available_height {
            break;
        }
        let line = format_line(line);
        rows += wrapped_rows(&line, area.width);
        lines.push(line);
    }
    lines.reverse();
    let start = end - lines.len();

    // Bottom-anchored like a terminal: pad short scrollbacks from the top,
    // and cut the top of an oldest line that only partly fits.
    let padding = available_height.saturating_sub(rows) as u16;
    let overflow = rows.saturating_sub(available_height) as u16;
    let text_area = Rect {
        y: area.y + padding,
        height: area.height - padding,
        ..area
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((overflow, 0));
    frame.render_widget(paragraph, text_area);

    if total > available_height {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(available_height)).position(start);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .thumb_symbol("┃")
            .track_symbol(Some("│"))
            .thumb_style(Theme::scrollbar_thumb())
            .track_style(Theme::scrollbar_track());

        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

/// Rows `line` takes once word-wrapped to `width`, counted the way the
/// paragraph below wraps it.
fn wrapped_rows(line: &Line<'static>, width: u16) -> usize {
    Paragraph::new(line.clone())
        .wrap(Wrap { trim: false })
        .line_count(width.max(1))
        .max(1)
}

fn format_line(line: &ScrollbackLine) -> Line<'static> {
    let mut spans = Vec::new();
    if !line.timestamp.is_empty() {
        spans.push(Span::styled(
            format!("{} ", line.timestamp),
            Theme::timestamp(),
        ));
    }
    spans.extend(mirc_colors::parse_mirc_formatted(
        &line.text,
        Theme::message_text(),
    ));
    Line::from(spans)
}
