//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the client works out of the box.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::nickname::generate_nickname;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub colors: ColorConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The server to connect to and who to connect as.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_nickname")]
    pub nickname: String,
    /// Real name sent at registration. Defaults to the nickname.
    #[serde(default)]
    pub realname: Option<String>,
    #[serde(default = "default_quit_message")]
    pub quit_message: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            nickname: default_nickname(),
            realname: None,
            quit_message: default_quit_message(),
        }
    }
}

impl ServerConfig {
    pub fn realname(&self) -> &str {
        self.realname.as_deref().unwrap_or(&self.nickname)
    }
}

/// Per-label colors. Each is a palette name or index with an optional `+b`
/// suffix for bold. Empty means "derive from the text" when `auto_color` is
/// on and "no color" otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    #[serde(default = "default_self_color")]
    pub self_color: String,
    #[serde(default)]
    pub nick_color: String,
    #[serde(default = "default_chan_color")]
    pub chan_color: String,
    #[serde(default = "default_error_color")]
    pub error_color: String,
    #[serde(default = "default_true")]
    pub auto_color: bool,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            self_color: default_self_color(),
            nick_color: String::new(),
            chan_color: default_chan_color(),
            error_color: default_error_color(),
            auto_color: true,
        }
    }
}

/// Message templates and scrollback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Always tag conversational lines with their destination.
    #[serde(default)]
    pub verbose: bool,
    #[serde(default = "default_message_template")]
    pub message: String,
    #[serde(default = "default_action_template")]
    pub action: String,
    #[serde(default = "default_prompt_template")]
    pub prompt: String,
    #[serde(default = "default_error_template")]
    pub error: String,
    /// `chrono` format for the per-line timestamp. Empty disables it.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_max_scrollback")]
    pub max_scrollback: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            message: default_message_template(),
            action: default_action_template(),
            prompt: default_prompt_template(),
            error: default_error_template(),
            timestamp_format: default_timestamp_format(),
            max_scrollback: default_max_scrollback(),
        }
    }
}

/// Line editor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
            history_size: default_history_size(),
        }
    }
}

/// Diagnostic log settings. Without a file nothing is logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "irc.libera.chat".to_string()
}
fn default_port() -> u16 {
    6667
}
fn default_nickname() -> String {
    generate_nickname()
}
fn default_quit_message() -> String {
    "Leaving...".to_string()
}
fn default_true() -> bool {
    true
}
fn default_self_color() -> String {
    "cyan+b".to_string()
}
fn default_chan_color() -> String {
    "red+b".to_string()
}
fn default_error_color() -> String {
    "red".to_string()
}
fn default_message_template() -> String {
    "{target}< {source}> {body}".to_string()
}
fn default_action_template() -> String {
    "{target}* {source} ~> {body}".to_string()
}
fn default_prompt_template() -> String {
    "[{nick}.{window}] ".to_string()
}
fn default_error_template() -> String {
    "-!- {body}".to_string()
}
fn default_timestamp_format() -> String {
    "%H:%M".to_string()
}
fn default_max_scrollback() -> usize {
    10000
}
fn default_history_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tern")
        .join("history")
}
fn default_history_size() -> usize {
    1000
}
fn default_log_level() -> String {
    "info".to_string()
}
