//! The two concurrent activities and the logic they share.

pub mod input;
pub mod render;
pub mod server;
pub mod session;
pub mod template;

use crate::irc::connection::Outbound;
use crate::ui::console::Console;
use render::Renderer;
use session::Session;

/// Handles every activity needs: shared state, the formatter, the output
/// sink and the server connection.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub session: Session,
    pub renderer: Renderer,
    pub console: Console,
    pub outbound: Outbound,
}

impl AppContext {
    pub fn refresh_prompt(&self) {
        self.console
            .set_prompt(self.renderer.prompt(&self.session.view()));
    }
}
