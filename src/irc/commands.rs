//! User slash-command builder.
//!
//! Turns one line of user input into the protocol line to send, validating
//! argument counts against [`COMMANDS`]. Lines without a leading `/` are chat
//! text for the focused window.

use crate::app::session::{Session, SessionView};
use crate::error::CommandError;

pub const DEFAULT_QUIT_MESSAGE: &str = "Leaving...";

/// What a table entry does besides sending its protocol line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Send only.
    Send,
    /// Send, then focus the joined channel.
    Join,
    /// Send, then focus the console.
    Part,
    /// Send, then take the new nickname.
    Nick,
    /// `PRIVMSG` to an explicit target, echoed locally.
    Message,
    /// CTCP action to the focused window, echoed locally.
    Action,
    /// Local focus change, nothing sent.
    Window,
    /// `QUIT`, then stop reading input.
    Quit,
    /// List the commands locally.
    Help,
}

/// One supported slash-command.
#[derive(Debug)]
pub struct CommandSpec {
    pub aliases: &'static [&'static str],
    /// Protocol verb sent for [`CommandKind::Send`]-like entries.
    pub command: &'static str,
    /// Arguments required after the verb.
    pub min_args: usize,
    pub usage: &'static str,
    /// With too few arguments and a channel focused, the channel is appended.
    pub channel_default: bool,
    /// The second argument is sent as a `:`-trailing parameter.
    pub trailing: bool,
    pub kind: CommandKind,
}

const fn spec(
    aliases: &'static [&'static str],
    command: &'static str,
    min_args: usize,
    usage: &'static str,
    kind: CommandKind,
) -> CommandSpec {
    CommandSpec {
        aliases,
        command,
        min_args,
        usage,
        channel_default: false,
        trailing: false,
        kind,
    }
}

const fn channel_spec(
    aliases: &'static [&'static str],
    command: &'static str,
    usage: &'static str,
    trailing: bool,
    kind: CommandKind,
) -> CommandSpec {
    CommandSpec {
        aliases,
        command,
        min_args: 1,
        usage,
        channel_default: true,
        trailing,
        kind,
    }
}

pub const COMMANDS: &[CommandSpec] = &[
    spec(
        &["/m", "/msg", "/send", "/s"],
        "PRIVMSG",
        2,
        "/msg <channel/user> <message>",
        CommandKind::Message,
    ),
    spec(&["/me", "/action"], "PRIVMSG", 1, "/me <message>", CommandKind::Action),
    spec(&["/j", "/join"], "JOIN", 1, "/join <channel>", CommandKind::Join),
    channel_spec(
        &["/p", "/part"],
        "PART",
        "/part [<channel>] [<reason>]",
        true,
        CommandKind::Part,
    ),
    channel_spec(&["/who"], "WHO", "/who <channel>", false, CommandKind::Send),
    spec(&["/whois"], "WHOIS", 1, "/whois <user/channel/op>", CommandKind::Send),
    spec(&["/whowas"], "WHOWAS", 1, "/whowas <nick>", CommandKind::Send),
    channel_spec(
        &["/topic"],
        "TOPIC",
        "/topic [<channel>] [<new topic>]",
        true,
        CommandKind::Send,
    ),
    channel_spec(&["/names"], "NAMES", "/names [<channel>]", false, CommandKind::Send),
    spec(&["/n", "/nick"], "NICK", 1, "/nick <newnick>", CommandKind::Nick),
    spec(
        &["/w", "/cur", "/win", "/window"],
        "",
        1,
        "/window <channel/user>",
        CommandKind::Window,
    ),
    spec(&["/q", "/quit"], "QUIT", 0, "/quit [<reason>]", CommandKind::Quit),
    spec(&["/help"], "", 0, "/help", CommandKind::Help),
];

/// Look up a verb (including its leading `/`). Case-sensitive.
pub fn lookup(verb: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.aliases.contains(&verb))
}

/// Chat text sent by the user, for local display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Echo {
    pub target: String,
    pub body: String,
    pub is_action: bool,
}

/// Result of a successfully built input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outgoing {
    /// Protocol line to write, without line terminator.
    pub line: Option<String>,
    pub echo: Option<Echo>,
    /// `set_focus` was applied; the prompt and a notice need updating.
    pub focus_changed: bool,
    pub quit: bool,
    pub help: bool,
}

impl Outgoing {
    fn send(line: String) -> Self {
        Self {
            line: Some(line),
            ..Self::default()
        }
    }
}

/// Builds protocol lines from user input against a shared [`Session`].
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    session: Session,
    quit_message: String,
}

impl CommandBuilder {
    pub fn new(session: Session, quit_message: impl Into<String>) -> Self {
        Self {
            session,
            quit_message: quit_message.into(),
        }
    }

    /// `QUIT` line sent when input ends without an explicit `/quit`.
    pub fn default_quit(&self) -> String {
        format!("QUIT :{}", self.quit_message)
    }

    /// Build the protocol line for one line of input. Focus and identity
    /// changes are applied to the session before returning.
    pub fn build(&self, input: &str) -> Result<Outgoing, CommandError> {
        let input = input.trim_end_matches(['\r', '\n']);
        if input.trim().is_empty() {
            return Ok(Outgoing::default());
        }

        let view = self.session.view();
        if input.len() > 1 && input.starts_with('/') {
            self.build_command(&view, input)
        } else {
            self.build_chat(&view, input)
        }
    }

    fn build_chat(&self, view: &SessionView, text: &str) -> Result<Outgoing, CommandError> {
        if view.at_console() {
            return Err(CommandError::NotAllowed(
                "No window selected, use /window <channel/user> first".to_string(),
            ));
        }
        if !has_text(text) {
            return Ok(Outgoing::default());
        }
        Ok(privmsg(&view.focus, text, false))
    }

    fn build_command(&self, view: &SessionView, input: &str) -> Result<Outgoing, CommandError> {
        let (verb, rest) = match input.split_once(' ') {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };

        let Some(spec) = lookup(verb) else {
            let raw = input[1..].trim();
            if raw.is_empty() {
                return Ok(Outgoing::default());
            }
            return Ok(Outgoing::send(raw.to_string()));
        };

        let usage = || CommandError::Usage(spec.usage.to_string());
        let mut args = split_args(rest);

        match spec.kind {
            CommandKind::Message => {
                let [target, text] = args[..] else {
                    return Err(usage());
                };
                if !has_text(text) {
                    return Err(usage());
                }
                let out = privmsg(target, text, false);
                self.session.set_focus(target);
                Ok(Outgoing {
                    focus_changed: true,
                    ..out
                })
            }
            CommandKind::Action => {
                if !has_text(rest) {
                    return Err(usage());
                }
                if view.at_console() {
                    return Err(CommandError::NotAllowed(
                        "No window selected for /me, use /window <channel/user> first"
                            .to_string(),
                    ));
                }
                Ok(privmsg(&view.focus, rest, true))
            }
            CommandKind::Window => {
                let Some(target) = args.first() else {
                    return Err(usage());
                };
                self.session.set_focus(*target);
                Ok(Outgoing {
                    focus_changed: true,
                    ..Outgoing::default()
                })
            }
            CommandKind::Quit => {
                let reason = if rest.is_empty() {
                    self.quit_message.as_str()
                } else {
                    rest
                };
                Ok(Outgoing {
                    line: Some(format!("QUIT :{reason}")),
                    quit: true,
                    ..Outgoing::default()
                })
            }
            CommandKind::Help => Ok(Outgoing {
                help: true,
                ..Outgoing::default()
            }),
            CommandKind::Send | CommandKind::Join | CommandKind::Part | CommandKind::Nick => {
                if args.len() < spec.min_args && spec.channel_default && view.focus_is_channel() {
                    args.push(view.focus.as_str());
                }
                if args.len() < spec.min_args {
                    return Err(usage());
                }
                let line = compose(spec, &args);

                let mut out = Outgoing::send(line);
                match spec.kind {
                    CommandKind::Join => {
                        self.session.set_focus(args[0]);
                        out.focus_changed = true;
                    }
                    CommandKind::Part => {
                        self.session.set_focus(view.identity.as_str());
                        out.focus_changed = true;
                    }
                    CommandKind::Nick => {
                        self.session.set_identity(args[0]);
                        out.focus_changed = view.at_console();
                    }
                    _ => {}
                }
                Ok(out)
            }
        }
    }
}

/// Split the text after the verb into at most two arguments: the first word
/// and the remainder as one token.
fn split_args(rest: &str) -> Vec<&str> {
    if rest.is_empty() {
        return Vec::new();
    }
    match rest.split_once(' ') {
        Some((first, remainder)) => {
            let remainder = remainder.trim();
            if remainder.is_empty() {
                vec![first]
            } else {
                vec![first, remainder]
            }
        }
        None => vec![rest],
    }
}

fn compose(spec: &CommandSpec, args: &[&str]) -> String {
    match args {
        [first, last] if spec.trailing => format!("{} {first} :{last}", spec.command),
        _ => std::iter::once(spec.command)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Whether anything besides CTCP delimiters and blanks is left to send.
fn has_text(text: &str) -> bool {
    text.chars().any(|c| c != '\x01' && !c.is_whitespace())
}

fn privmsg(target: &str, text: &str, is_action: bool) -> Outgoing {
    // Only /me may produce a CTCP envelope.
    let clean = text.replace('\x01', "");
    let payload = if is_action {
        format!("\x01ACTION {clean}\x01")
    } else {
        clean.clone()
    };
    Outgoing {
        line: Some(format!("PRIVMSG {target} :{payload}")),
        echo: Some(Echo {
            target: target.to_string(),
            body: clean,
            is_action,
        }),
        ..Outgoing::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(identity: &str) -> (Session, CommandBuilder) {
        let session = Session::new(identity);
        let builder = CommandBuilder::new(session.clone(), DEFAULT_QUIT_MESSAGE);
        (session, builder)
    }

    #[test]
    fn test_join_sets_focus() {
        let (session, builder) = builder("bob");
        let out = builder.build("/join #test").unwrap();
        assert_eq!(out.line.as_deref(), Some("JOIN #test"));
        assert!(out.focus_changed);
        assert_eq!(session.focus(), "#test");
    }

    #[test]
    fn test_chat_goes_to_focus() {
        let (session, builder) = builder("bob");
        session.set_focus("#test");
        let out = builder.build("hello").unwrap();
        assert_eq!(out.line.as_deref(), Some("PRIVMSG #test :hello"));
        assert_eq!(
            out.echo,
            Some(Echo {
                target: "#test".into(),
                body: "hello".into(),
                is_action: false,
            })
        );
        assert!(!out.focus_changed);
    }

    #[test]
    fn test_chat_at_console_is_not_allowed() {
        let (_, builder) = builder("bob");
        let err = builder.build("hello").unwrap_err();
        assert!(matches!(err, CommandError::NotAllowed(_)));
    }

    #[test]
    fn test_empty_line_does_nothing() {
        let (_, builder) = builder("bob");
        assert_eq!(builder.build("").unwrap(), Outgoing::default());
        assert_eq!(builder.build("   ").unwrap(), Outgoing::default());
    }

    #[test]
    fn test_msg_requires_body() {
        let (session, builder) = builder("bob");
        let err = builder.build("/msg carol").unwrap_err();
        assert_eq!(
            err,
            CommandError::Usage("/msg <channel/user> <message>".into())
        );
        assert_eq!(session.focus(), "bob");
    }

    #[test]
    fn test_msg_focuses_target_and_echoes() {
        let (session, builder) = builder("bob");
        let out = builder.build("/m carol how are you").unwrap();
        assert_eq!(out.line.as_deref(), Some("PRIVMSG carol :how are you"));
        assert!(out.focus_changed);
        assert_eq!(session.focus(), "carol");
        assert_eq!(out.echo.unwrap().body, "how are you");
    }

    #[test]
    fn test_window_then_addressed() {
        let (session, builder) = builder("bob");
        let out = builder.build("/window #chan").unwrap();
        assert_eq!(out.line, None);
        assert!(out.focus_changed);
        assert!(session.is_addressed_to_focus("#chan"));
    }

    #[test]
    fn test_window_requires_target() {
        let (_, builder) = builder("bob");
        let err = builder.build("/w").unwrap_err();
        assert_eq!(err, CommandError::Usage("/window <channel/user>".into()));
    }

    #[test]
    fn test_me_wraps_action() {
        let (session, builder) = builder("bob");
        session.set_focus("#rust");
        let out = builder.build("/me waves hello").unwrap();
        assert_eq!(
            out.line.as_deref(),
            Some("PRIVMSG #rust :\x01ACTION waves hello\x01")
        );
        let echo = out.echo.unwrap();
        assert!(echo.is_action);
        assert_eq!(echo.body, "waves hello");
    }

    #[test]
    fn test_me_errors() {
        let (session, builder) = builder("bob");
        assert!(matches!(
            builder.build("/me waves"),
            Err(CommandError::NotAllowed(_))
        ));
        session.set_focus("#rust");
        assert!(matches!(builder.build("/me"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_ctcp_delimiters_are_stripped() {
        let (session, builder) = builder("bob");
        session.set_focus("#rust");
        let out = builder.build("\x01VERSION\x01").unwrap();
        assert_eq!(out.line.as_deref(), Some("PRIVMSG #rust :VERSION"));
    }

    #[test]
    fn test_delimiter_only_text_sends_nothing() {
        let (session, builder) = builder("bob");
        session.set_focus("#rust");
        assert_eq!(builder.build("\x01\x01").unwrap(), Outgoing::default());
        assert_eq!(builder.build("\x01 \x01").unwrap(), Outgoing::default());
        assert!(matches!(
            builder.build("/msg carol \x01\x01"),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            builder.build("/me \x01"),
            Err(CommandError::Usage(_))
        ));
        assert_eq!(session.focus(), "#rust");
    }

    #[test]
    fn test_channel_default_uses_focus() {
        let (session, builder) = builder("bob");
        session.set_focus("#rust");
        assert_eq!(
            builder.build("/names").unwrap().line.as_deref(),
            Some("NAMES #rust")
        );
        assert_eq!(
            builder.build("/who").unwrap().line.as_deref(),
            Some("WHO #rust")
        );
        assert_eq!(
            builder.build("/topic").unwrap().line.as_deref(),
            Some("TOPIC #rust")
        );
    }

    #[test]
    fn test_channel_default_needs_channel_focus() {
        let (session, builder) = builder("bob");
        assert!(matches!(builder.build("/names"), Err(CommandError::Usage(_))));
        session.set_focus("carol");
        assert!(matches!(builder.build("/who"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_topic_with_text_uses_trailing() {
        let (_, builder) = builder("bob");
        let out = builder.build("/topic #rust Rust 2024 is out").unwrap();
        assert_eq!(out.line.as_deref(), Some("TOPIC #rust :Rust 2024 is out"));
    }

    #[test]
    fn test_part_returns_to_console() {
        let (session, builder) = builder("bob");
        builder.build("/join #rust").unwrap();
        let out = builder.build("/part").unwrap();
        assert_eq!(out.line.as_deref(), Some("PART #rust"));
        assert_eq!(session.focus(), "bob");

        builder.build("/j #rust").unwrap();
        let out = builder.build("/p #rust see you").unwrap();
        assert_eq!(out.line.as_deref(), Some("PART #rust :see you"));
    }

    #[test]
    fn test_nick_updates_identity() {
        let (session, builder) = builder("bob");
        let out = builder.build("/nick robert").unwrap();
        assert_eq!(out.line.as_deref(), Some("NICK robert"));
        assert_eq!(session.identity(), "robert");
        assert_eq!(session.focus(), "robert");

        session.set_focus("#rust");
        builder.build("/n bobby").unwrap();
        assert_eq!(session.identity(), "bobby");
        assert_eq!(session.focus(), "#rust");
    }

    #[test]
    fn test_nick_requires_name() {
        let (session, builder) = builder("bob");
        let err = builder.build("/nick").unwrap_err();
        assert_eq!(err, CommandError::Usage("/nick <newnick>".into()));
        assert_eq!(session.identity(), "bob");
    }

    #[test]
    fn test_quit_default_and_custom_reason() {
        let (_, builder) = builder("bob");
        let out = builder.build("/q").unwrap();
        assert_eq!(out.line.as_deref(), Some("QUIT :Leaving..."));
        assert!(out.quit);

        let out = builder.build("/quit gone fishing").unwrap();
        assert_eq!(out.line.as_deref(), Some("QUIT :gone fishing"));
        assert!(out.quit);
    }

    #[test]
    fn test_default_quit_uses_configured_reason() {
        let builder = CommandBuilder::new(Session::new("bob"), "brb");
        assert_eq!(builder.default_quit(), "QUIT :brb");
        assert_eq!(builder.build("/q").unwrap().line.as_deref(), Some("QUIT :brb"));
    }

    #[test]
    fn test_whois_and_whowas() {
        let (_, builder) = builder("bob");
        assert_eq!(
            builder.build("/whois carol").unwrap().line.as_deref(),
            Some("WHOIS carol")
        );
        assert_eq!(
            builder.build("/whowas carol").unwrap().line.as_deref(),
            Some("WHOWAS carol")
        );
        assert!(matches!(builder.build("/whois"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_unknown_command_passes_through() {
        let (_, builder) = builder("bob");
        let out = builder.build("/MODE #rust +m").unwrap();
        assert_eq!(out.line.as_deref(), Some("MODE #rust +m"));
        let out = builder.build("/JOIN #caps").unwrap();
        assert_eq!(out.line.as_deref(), Some("JOIN #caps"));
        assert!(!out.focus_changed);
    }

    #[test]
    fn test_single_slash_is_chat() {
        let (session, builder) = builder("bob");
        session.set_focus("#rust");
        let out = builder.build("/").unwrap();
        assert_eq!(out.line.as_deref(), Some("PRIVMSG #rust :/"));
    }

    #[test]
    fn test_extra_spaces_between_arguments() {
        let (_, builder) = builder("bob");
        let out = builder.build("/msg   carol   hi  there").unwrap();
        assert_eq!(out.line.as_deref(), Some("PRIVMSG carol :hi  there"));
    }

    #[test]
    fn test_help() {
        let (_, builder) = builder("bob");
        let out = builder.build("/help").unwrap();
        assert!(out.help);
        assert_eq!(out.line, None);
    }

    #[test]
    fn test_aliases_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for spec in COMMANDS {
            for alias in spec.aliases {
                assert!(seen.insert(*alias), "duplicate alias {alias}");
                assert!(alias.starts_with('/'));
            }
        }
    }
}
