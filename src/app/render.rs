//! Display routing: server messages and local events to display lines.
//!
//! Every line produced here may carry mIRC formatting codes from the
//! [`Palette`]; the terminal view turns them into styled spans.

use crate::app::session::{is_channel, SessionView};
use crate::app::template::fill;
use crate::config::model::DisplayConfig;
use crate::error::CommandError;
use crate::irc::commands::{Echo, COMMANDS};
use crate::irc::message::Message;
use crate::irc::numeric::{classify, Category};
use crate::ui::palette::{ColorClass, Palette};

/// Marker used for notices generated by the client itself.
const LOCAL_MARKER: &str = "TERN";

/// Renders messages with the configured templates and colors.
#[derive(Debug, Clone)]
pub struct Renderer {
    palette: Palette,
    verbose: bool,
    message: String,
    action: String,
    prompt: String,
    error: String,
}

impl Renderer {
    pub fn new(palette: Palette, display: &DisplayConfig) -> Self {
        Self {
            palette,
            verbose: display.verbose,
            message: display.message.clone(),
            action: display.action.clone(),
            prompt: display.prompt.clone(),
            error: display.error.clone(),
        }
    }

    /// Render one parsed server line. `raw` is the line as received (without
    /// terminator). `None` means the line is not shown.
    pub fn render(&self, msg: &Message, raw: &str, view: &SessionView) -> Option<String> {
        let line = match msg.command.as_str() {
            "PING" => return None,
            "PRIVMSG" | "NOTICE" => self.conversation(msg, view),
            "ERROR" => format!(
                "-{}- {} {}",
                self.palette.colorize(ColorClass::Error, "ERROR"),
                self.nick(&msg.source, view),
                msg.trailing
            ),
            "JOIN" => {
                let channel = msg.destination().unwrap_or(&msg.trailing);
                format!(
                    "-JOIN- {} has joined {}",
                    self.nick(&msg.source, view),
                    self.target(channel)
                )
            }
            "PART" => {
                let (channel, reason) = match msg.destination() {
                    Some(channel) => (channel, msg.trailing.as_str()),
                    None => (msg.trailing.as_str(), ""),
                };
                format!(
                    "-PART- {} has left {}{}",
                    self.nick(&msg.source, view),
                    self.target(channel),
                    parenthesized(reason)
                )
            }
            "QUIT" => format!(
                "-QUIT- {} has quit{}",
                self.nick(&msg.source, view),
                parenthesized(&msg.trailing)
            ),
            "NICK" => {
                let new_nick = msg.destination().unwrap_or(&msg.trailing);
                format!(
                    "-NICK- {} is now known as {}",
                    self.nick(&msg.source, view),
                    self.nick(new_nick, view)
                )
            }
            "KICK" => {
                let channel = msg.params.first().map(String::as_str).unwrap_or_default();
                let victim = msg.params.get(1).map(String::as_str).unwrap_or_default();
                format!(
                    "-KICK- {} was kicked from {} by {}{}",
                    self.nick(victim, view),
                    self.target(channel),
                    self.nick(&msg.source, view),
                    parenthesized(&msg.trailing)
                )
            }
            "TOPIC" => {
                let channel = msg.destination().unwrap_or_default();
                format!(
                    "-TOPIC- {} changed the topic of {} to: {}",
                    self.nick(&msg.source, view),
                    self.target(channel),
                    msg.trailing
                )
            }
            "MODE" => self.mode(msg, false, view),
            "324" => self.mode(msg, true, view),
            code => match code.parse::<u16>() {
                Ok(_) => return self.numeric(classify(code), msg, raw, view),
                Err(err) => {
                    tracing::warn!(line = raw, "unrecognized server line");
                    format!(
                        "Unknown message type: {raw} ??? {err} | {} | {} | {}",
                        msg.source,
                        join_words(std::iter::once(msg.command.as_str()).chain(params(msg))),
                        msg.trailing
                    )
                }
            },
        };
        Some(line)
    }

    fn numeric(
        &self,
        category: Category,
        msg: &Message,
        raw: &str,
        view: &SessionView,
    ) -> Option<String> {
        let line = match category {
            Category::Info => format!("-INFO- {}", raw_tail(raw, &msg.trailing)),
            Category::Topic => format!("-TOPIC- {}", raw_tail(raw, &msg.trailing)),
            Category::Error => {
                let detail = join_words(params(msg).skip(1).chain([msg.trailing.as_str()]));
                format!(
                    "-{}- {} {}",
                    self.palette.colorize(ColorClass::Error, "ERROR"),
                    msg.source,
                    detail
                )
            }
            Category::Names => format!("-NAMES- {}", msg.trailing),
            Category::Who => match msg.params.get(1) {
                Some(subject) => format!("-WHO- {}: {}", self.nick(subject, view), msg.trailing),
                None => format!("-WHO- {}", msg.trailing),
            },
            Category::Ignored => return None,
            Category::Unknown => join_words(
                [msg.source.as_str(), msg.command.as_str()]
                    .into_iter()
                    .chain(params(msg))
                    .chain([msg.trailing.as_str()]),
            ),
        };
        Some(line)
    }

    /// `PRIVMSG` / `NOTICE`. The destination tag is shown in verbose mode,
    /// when the destination is not the focused window, or for private
    /// messages from someone other than the focused peer.
    fn conversation(&self, msg: &Message, view: &SessionView) -> String {
        let destination = msg.destination().unwrap_or(&msg.trailing);
        let tagged = self.verbose
            || destination != view.focus
            || (destination == view.identity && msg.source != view.focus);
        self.chat_line(
            tagged.then_some(destination),
            &self.nick(&msg.source, view),
            &msg.trailing,
            msg.is_action,
        )
    }

    /// Local echo of chat text the user just sent.
    pub fn echo(&self, echo: &Echo, view: &SessionView) -> String {
        let tagged = self.verbose || !view.is_addressed_to_focus(&echo.target);
        self.chat_line(
            tagged.then_some(echo.target.as_str()),
            &self.palette.colorize(ColorClass::SelfNick, &view.identity),
            &echo.body,
            echo.is_action,
        )
    }

    fn chat_line(&self, tag: Option<&str>, source: &str, body: &str, is_action: bool) -> String {
        let target = match tag {
            Some(destination) => format!("[{}] ", self.target(destination)),
            None => String::new(),
        };
        let template = if is_action { &self.action } else { &self.message };
        fill(
            template,
            &[("target", &target), ("source", source), ("body", body)],
        )
    }

    /// `MODE <subject> <changes...>`. For 324 the first token is our own nick
    /// and is dropped.
    fn mode(&self, msg: &Message, drop_addressee: bool, view: &SessionView) -> String {
        let words = join_words(params(msg).chain([msg.trailing.as_str()]));
        let mut rest = words.as_str();
        if drop_addressee {
            rest = rest.split_once(' ').map_or("", |(_, tail)| tail);
        }
        let (subject, changes) = rest.split_once(' ').unwrap_or((rest, ""));
        let subject = if is_channel(subject) {
            self.target(subject)
        } else {
            self.nick(subject, view)
        };
        join_words(["-MODE-", subject.as_str(), changes])
    }

    pub fn prompt(&self, view: &SessionView) -> String {
        fill(
            &self.prompt,
            &[
                (
                    "nick",
                    &self.palette.colorize(ColorClass::SelfNick, &view.identity),
                ),
                ("window", &self.target(&view.focus)),
            ],
        )
    }

    pub fn focus_notice(&self, view: &SessionView) -> String {
        format!(
            "-{LOCAL_MARKER}- Window focus changed to {}",
            self.target(&view.focus)
        )
    }

    /// A rejected input line, through the error template.
    pub fn local_error(&self, err: &CommandError) -> String {
        fill(
            &self.error,
            &[(
                "body",
                &self.palette.colorize(ColorClass::Error, &err.to_string()),
            )],
        )
    }

    pub fn help_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("-{LOCAL_MARKER}- Commands:")];
        lines.extend(COMMANDS.iter().map(|spec| {
            format!("-{LOCAL_MARKER}-   {:<32} {}", spec.usage, spec.aliases.join(" "))
        }));
        lines.push(format!(
            "-{LOCAL_MARKER}-   Any other /COMMAND is sent to the server as typed."
        ));
        lines
    }

    /// Colorized nick; our own nick gets the self color.
    fn nick(&self, nick: &str, view: &SessionView) -> String {
        let class = if nick == view.identity {
            ColorClass::SelfNick
        } else {
            ColorClass::Others
        };
        self.palette.colorize(class, nick)
    }

    /// Colorized window name: a channel or a private-message peer.
    fn target(&self, name: &str) -> String {
        self.palette.colorize(ColorClass::Channel, name)
    }
}

fn params(msg: &Message) -> impl Iterator<Item = &str> {
    msg.params.iter().map(String::as_str)
}

/// Join the non-empty words with single spaces.
fn join_words<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words
        .into_iter()
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn parenthesized(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" ({reason})")
    }
}

/// The raw line after its source, code and addressee, minus one leading `:`.
/// Falls back to the trailing parameter when the line is shorter.
fn raw_tail<'a>(raw: &'a str, trailing: &'a str) -> &'a str {
    let skip = if raw.starts_with(':') { 3 } else { 2 };
    match raw.splitn(skip + 1, ' ').nth(skip) {
        Some(tail) => {
            let tail = tail.trim();
            tail.strip_prefix(':').unwrap_or(tail)
        }
        None => trailing,
    }
}
