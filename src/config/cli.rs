use clap::Parser;
use std::path::PathBuf;

/// Line-oriented IRC client for the terminal.
///
/// Flags override the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "tern", version, about)]
pub struct Cli {
    /// Hostname of the IRC server.
    #[arg(short = 's', long = "server")]
    pub host: Option<String>,

    /// Port of the IRC server.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Your nick, also used as user and real name.
    #[arg(short, long)]
    pub nick: Option<String>,

    /// Path to the persistent input history file.
    #[arg(long = "histfile")]
    pub history_file: Option<PathBuf>,

    /// Color of your own nick (name or 0-15, "+b" for bold).
    #[arg(long)]
    pub self_color: Option<String>,

    /// Color of others' nicks. Empty picks one per nick.
    #[arg(long)]
    pub nick_color: Option<String>,

    /// Color of channel names.
    #[arg(long)]
    pub chan_color: Option<String>,

    /// Color of error markers.
    #[arg(long)]
    pub error_color: Option<String>,

    /// Give labels without a configured color a color derived from their text.
    #[arg(long)]
    pub auto_color: Option<bool>,

    /// Always show which channel or nick a message was sent to.
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file to load instead of the default location.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write diagnostic logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace.
    #[arg(long)]
    pub log_level: Option<String>,
}
