//! Server line parser.
//!
//! Turns one newline-stripped protocol line into a [`Message`]. Parsing never
//! fails: lines that do not fit the usual `:source VERB params :trailing`
//! shape degrade to whatever fields could be recovered, with empty strings
//! standing in for missing parts.

/// Origin shown for lines that carry no `:source` tag.
pub const SYSTEM_SOURCE: &str = "---";

/// Inner verb of a CTCP envelope that marks a third-person action.
pub const ACTION_MARKER: &str = "ACTION";

const CTCP_DELIM: char = '\x01';

/// A parsed server line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Nick of the sender (the part of `nick!user@host` before `!`), the raw
    /// server name, or [`SYSTEM_SOURCE`].
    pub source: String,
    /// Verb or three-digit numeric code.
    pub command: String,
    /// Middle parameters, in order. For conversational verbs the first one is
    /// the destination.
    pub params: Vec<String>,
    /// Free-text final parameter. For actions, the unwrapped action text.
    pub trailing: String,
    /// The trailing parameter was a CTCP `ACTION` envelope.
    pub is_action: bool,
}

impl Message {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);

        let (source, rest) = match line.strip_prefix(':') {
            Some(tagged) => split_source(tagged),
            None => (SYSTEM_SOURCE.to_string(), line),
        };
        let rest = rest.trim_matches(' ');

        let (command, params, trailing) = match rest.find(':') {
            Some(colon) => {
                let head = rest[..colon].trim_matches(|c| c == ' ' || c == ':');
                let mut words = head.split_whitespace();
                let command = words.next().unwrap_or_default().to_string();
                let params = words.map(str::to_string).collect();
                (command, params, rest[colon + 1..].trim())
            }
            // No trailing parameter: first word is the verb, the rest is body.
            None => match rest.split_once(' ') {
                Some((verb, tail)) => (verb.to_string(), Vec::new(), tail.trim()),
                None => (rest.to_string(), Vec::new(), ""),
            },
        };

        let (trailing, is_action) = match unwrap_action(trailing) {
            Some(text) => (text.to_string(), true),
            None => (trailing.to_string(), false),
        };

        Self {
            source,
            command,
            params,
            trailing,
            is_action,
        }
    }

    /// First middle parameter: the channel or nick a conversational message
    /// was sent to.
    pub fn destination(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}

/// Split `nick!user@host rest` into the nick and the unparsed remainder.
fn split_source(tagged: &str) -> (String, &str) {
    let end = tagged.find(' ').unwrap_or(tagged.len());
    let token = &tagged[..end];
    let nick = token.split_once('!').map_or(token, |(nick, _)| nick);
    let source = if nick.is_empty() { SYSTEM_SOURCE } else { nick };
    (source.to_string(), &tagged[end..])
}

/// Returns the action text if `trailing` is `\x01ACTION text\x01`.
fn unwrap_action(trailing: &str) -> Option<&str> {
    // Shorter than the two delimiters plus one byte: never an envelope.
    if trailing.len() < 3 {
        return None;
    }
    let inner = trailing
        .strip_prefix(CTCP_DELIM)?
        .strip_suffix(CTCP_DELIM)?;
    match inner.split_once(' ') {
        Some((marker, text)) if marker == ACTION_MARKER => Some(text.trim()),
        None if inner == ACTION_MARKER => Some(""),
        _ => None,
    }
}
