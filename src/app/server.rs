//! Server-handling activity: server lines in, display lines out.

use tokio::io::AsyncRead;
use tracing::info;

use super::AppContext;
use crate::error::TransportError;
use crate::irc::connection::ServerLines;
use crate::irc::message::Message;

/// Read, answer and display server lines until the connection ends.
/// `Ok(())` means the server closed the stream.
pub async fn run<R: AsyncRead + Unpin>(
    ctx: AppContext,
    mut lines: ServerLines<R>,
) -> Result<(), TransportError> {
    while let Some(raw) = lines.next_line().await? {
        if raw.trim().is_empty() {
            continue;
        }
        let msg = Message::parse(&raw);
        if msg.command == "PING" {
            ctx.outbound.send(format!("PONG :{}", msg.trailing))?;
            continue;
        }
        if let Some(line) = ctx.renderer.render(&msg, &raw, &ctx.session.view()) {
            ctx.console.print(line);
        }
    }
    info!("server closed the connection");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::render::Renderer;
    use crate::app::session::Session;
    use crate::config::model::DisplayConfig;
    use crate::irc::connection::Outbound;
    use crate::ui::console::{self, UiCommand};
    use crate::ui::palette::Palette;
    use tokio::sync::mpsc;

    type Receivers = (
        mpsc::UnboundedReceiver<UiCommand>,
        mpsc::UnboundedReceiver<String>,
    );

    fn context(session: &Session) -> (AppContext, Receivers) {
        let (console, _reader, endpoints) = console::channel();
        let (outbound, sent) = Outbound::channel();
        let ctx = AppContext {
            session: session.clone(),
            renderer: Renderer::new(Palette::PLAIN, &DisplayConfig::default()),
            console,
            outbound,
        };
        (ctx, (endpoints.commands, sent))
    }

    fn printed(rx: &mut mpsc::UnboundedReceiver<UiCommand>) -> Vec<String> {
        std::iter::from_fn(|| rx.try_recv().ok())
            .filter_map(|command| match command {
                UiCommand::Print(line) => Some(line),
                UiCommand::SetPrompt(_) => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_session_transcript() {
        let session = Session::new("bob");
        session.set_focus("#test");
        let (ctx, (mut ui, mut sent)) = context(&session);

        let input: &[u8] = b":irc.example.net 001 bob :Welcome bob\r\n\
            PING :irc.example.net\r\n\
            \r\n\
            :carol!c@host PRIVMSG #test :hi all\r\n\
            :carol!c@host PRIVMSG bob :hi\r\n\
            :irc.example.net 205 bob :trace\r\n";
        run(ctx, ServerLines::new(input)).await.unwrap();

        assert_eq!(
            printed(&mut ui),
            vec![
                "-INFO- Welcome bob",
                "< carol> hi all",
                "[bob] < carol> hi",
            ]
        );
        assert_eq!(sent.try_recv().unwrap(), "PONG :irc.example.net");
        assert!(sent.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_addressing_follows_current_focus() {
        let session = Session::new("bob");
        let (ctx, (mut ui, _sent)) = context(&session);

        let input: &[u8] = b":carol!c@h PRIVMSG #rust :hello\r\n";
        run(ctx.clone(), ServerLines::new(input)).await.unwrap();
        session.set_focus("#rust");
        run(ctx, ServerLines::new(input)).await.unwrap();

        assert_eq!(
            printed(&mut ui),
            vec!["[#rust] < carol> hello", "< carol> hello"]
        );
    }

    #[tokio::test]
    async fn test_pong_after_writer_gone_is_fatal() {
        let session = Session::new("bob");
        let (ctx, (_ui, sent)) = context(&session);
        drop(sent);
        let input: &[u8] = b"PING :x\r\n";
        assert!(matches!(
            run(ctx, ServerLines::new(input)).await,
            Err(TransportError::Closed)
        ));
    }
}
