mod app;
mod config;
mod error;
mod irc;
mod logging;
mod ui;

use crate::app::render::Renderer;
use crate::app::session::Session;
use crate::app::AppContext;
use crate::config::Cli;
use crate::error::TransportError;
use crate::irc::commands::CommandBuilder;
use crate::irc::connection::{self, Connection};
use crate::ui::editor::HistoryFile;
use crate::ui::palette::Palette;
use crate::ui::screen::{Screen, Scrollback};
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use tokio::task::JoinError;
use tracing::{debug, info};

type ActivityResult = Result<Result<(), TransportError>, JoinError>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::from_cli(&cli)?;
    logging::init(&cfg.logging)?;
    let palette = Palette::from_config(&cfg.colors)?;

    let server = &cfg.server;
    let Connection {
        lines,
        outbound,
        writer,
    } = match connection::connect(&server.host, server.port).await {
        Ok(connection) => connection,
        Err(e) => {
            eprintln!("Exiting: {e}");
            std::process::exit(1);
        }
    };
    connection::register(&outbound, &server.nickname, server.realname())?;
    info!(nick = %server.nickname, "registration sent");

    let session = Session::new(server.nickname.clone());
    let (console, reader, endpoints) = ui::console::channel();
    let ctx = AppContext {
        session: session.clone(),
        renderer: Renderer::new(palette, &cfg.display),
        console,
        outbound,
    };
    let builder = CommandBuilder::new(session, server.quit_message.clone());
    let history = HistoryFile::new(&cfg.editor.history_file);
    let (recorder, history_task) = history.spawn_recorder();
    let screen = Screen::new(
        Scrollback::new(cfg.display.max_scrollback, cfg.display.timestamp_format.clone()),
        format!("{}:{}", server.host, server.port),
    )
    .with_history(&history, cfg.editor.history_size, recorder);

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut input_task = tokio::spawn(app::input::run(ctx.clone(), reader, builder));
    let mut server_task = tokio::spawn(app::server::run(ctx, lines));

    let mut ui_result = Ok(());
    let notice = tokio::select! {
        result = ui::run(&mut terminal, screen, endpoints) => {
            info!("terminal closed");
            ui_result = result;
            // The reader sees end of input and sends the final QUIT.
            let notice = exit_notice(input_task.await);
            server_task.abort();
            let _ = server_task.await;
            notice
        }
        result = &mut input_task => {
            info!("input finished");
            server_task.abort();
            let _ = server_task.await;
            exit_notice(result)
        }
        result = &mut server_task => {
            info!("server activity finished");
            input_task.abort();
            let _ = input_task.await;
            Some(exit_notice(result).unwrap_or_else(|| "Connection closed.".to_string()))
        }
    };

    // Every Outbound lived in the tasks. With them gone the writer drains
    // what is queued and closes the socket.
    match writer.await {
        Ok(Err(e)) => debug!("writer stopped: {e}"),
        Err(e) => debug!("writer task failed: {e}"),
        Ok(Ok(())) => {}
    }
    // The screen is gone, so the recorder has its last entry.
    if let Err(e) = history_task.await {
        debug!("history task failed: {e}");
    }

    // Restore terminal
    restore_terminal()?;

    if let Some(notice) = notice {
        println!("{notice}");
    }
    ui_result
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
    Ok(())
}

/// `Exiting: <error>` for a failed activity, nothing for a clean finish.
fn exit_notice(result: ActivityResult) -> Option<String> {
    match result {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(format!("Exiting: {e}")),
        Err(e) if e.is_cancelled() => None,
        Err(e) => Some(format!("Exiting: {e}")),
    }
}
