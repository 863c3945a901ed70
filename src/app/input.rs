//! Input-handling activity: editor lines in, protocol lines out.

use tracing::{debug, info};

use super::AppContext;
use crate::error::TransportError;
use crate::irc::commands::{CommandBuilder, Outgoing};
use crate::ui::console::{LineReader, ReadOutcome};

/// Read and dispatch input until `/quit`, an interrupt or end of input. The
/// latter two still send a final `QUIT`.
pub async fn run(
    ctx: AppContext,
    mut reader: LineReader,
    builder: CommandBuilder,
) -> Result<(), TransportError> {
    ctx.refresh_prompt();
    loop {
        let line = match reader.read_line().await {
            ReadOutcome::Line(line) => line,
            outcome => {
                info!(?outcome, "input closed");
                // Best effort: the writer may already be gone.
                let _ = ctx.outbound.send(builder.default_quit());
                return Ok(());
            }
        };

        match builder.build(&line) {
            Ok(outgoing) => {
                if dispatch(&ctx, outgoing)? {
                    info!("quit requested");
                    return Ok(());
                }
            }
            Err(err) => {
                debug!(%err, "input rejected");
                ctx.console.print(ctx.renderer.local_error(&err));
            }
        }
        ctx.refresh_prompt();
    }
}

/// Send and display one built line. Returns true when input should stop.
fn dispatch(ctx: &AppContext, outgoing: Outgoing) -> Result<bool, TransportError> {
    if let Some(line) = outgoing.line {
        ctx.outbound.send(line)?;
    }

    let view = ctx.session.view();
    if outgoing.focus_changed {
        ctx.console.print(ctx.renderer.focus_notice(&view));
    }
    if let Some(echo) = &outgoing.echo {
        ctx.console.print(ctx.renderer.echo(echo, &view));
    }
    if outgoing.help {
        for line in ctx.renderer.help_lines() {
            ctx.console.print(line);
        }
    }
    Ok(outgoing.quit)
}
