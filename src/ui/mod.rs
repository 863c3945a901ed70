//! Full-screen terminal front end: the line editor and output sink used by
//! the input and server activities.

pub mod console;
pub mod editor;
mod input_box;
mod layout;
mod message_area;
pub mod mirc_colors;
pub mod palette;
pub mod screen;
mod status_bar;
mod theme;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::prelude::*;

use console::UiEndpoints;
use screen::Screen;

pub fn render(frame: &mut Frame, screen: &Screen) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    message_area::render(frame, app_layout.message_area, &screen.scrollback);
    input_box::render(frame, app_layout.input_box, screen);
    status_bar::render(frame, app_layout.status_bar, screen);
}

/// Drive the terminal until the activities hang up or the terminal's event
/// stream ends.
pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    mut screen: Screen,
    mut endpoints: UiEndpoints,
) -> Result<()> {
    let mut events = EventStream::new();
    terminal.draw(|f| render(f, &screen))?;

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    if let Some(outcome) = screen.handle_key(key) {
                        if endpoints.lines.send(outcome).is_err() {
                            break;
                        }
                    }
                }
                Some(Ok(Event::Paste(text))) => {
                    text.chars()
                        .filter(|c| !c.is_control())
                        .for_each(|c| screen.input.insert_char(c));
                }
                // Resize and the rest only need a redraw.
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            command = endpoints.commands.recv() => {
                let Some(command) = command else { break };
                screen.apply(command);
                // Batch whatever else is queued into one redraw.
                while let Ok(command) = endpoints.commands.try_recv() {
                    screen.apply(command);
                }
            }
        }
        terminal.draw(|f| render(f, &screen))?;
    }
    Ok(())
}
