pub mod cli;
pub mod model;
pub mod nickname;

use anyhow::{bail, ensure, Context, Result};
use chrono::format::{Item, StrftimeItems};
use std::path::{Path, PathBuf};

use crate::ui::palette::Palette;
pub use cli::Cli;
pub use model::AppConfig;

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tern")
        .join("config.toml")
}

/// Load the config file. An explicit `path` must exist; the default location
/// may be missing, in which case defaults are used.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_path();
            if !path.exists() {
                return Ok(AppConfig::default());
            }
            path
        }
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Load the config named by the CLI (or the default one), apply the CLI
/// overrides, and validate the result.
pub fn from_cli(cli: &Cli) -> Result<AppConfig> {
    let mut config = load_config(cli.config.as_deref())?;
    config.apply_cli(cli);
    config.validate()?;
    Ok(config)
}

impl AppConfig {
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(nick) = &cli.nick {
            self.server.nickname = nick.clone();
        }
        if let Some(path) = &cli.history_file {
            self.editor.history_file = path.clone();
        }
        if let Some(color) = &cli.self_color {
            self.colors.self_color = color.clone();
        }
        if let Some(color) = &cli.nick_color {
            self.colors.nick_color = color.clone();
        }
        if let Some(color) = &cli.chan_color {
            self.colors.chan_color = color.clone();
        }
        if let Some(color) = &cli.error_color {
            self.colors.error_color = color.clone();
        }
        if let Some(auto) = cli.auto_color {
            self.colors.auto_color = auto;
        }
        if cli.verbose {
            self.display.verbose = true;
        }
        if let Some(path) = &cli.log_file {
            self.logging.file = Some(path.clone());
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.server.host.trim().is_empty(), "server host is empty");
        ensure!(self.server.port != 0, "server port must be non-zero");

        let nick = &self.server.nickname;
        ensure!(!nick.is_empty(), "nickname is empty");
        if nick.contains(char::is_whitespace) || nick.starts_with([':', '#', '&']) {
            bail!("invalid nickname {nick:?}");
        }

        Palette::from_config(&self.colors).context("invalid [colors] setting")?;
        crate::logging::parse_level(&self.logging.level)?;
        ensure!(
            self.display.max_scrollback > 0,
            "display.max_scrollback must be at least 1"
        );
        let format = &self.display.timestamp_format;
        ensure!(
            !StrftimeItems::new(format).any(|item| matches!(item, Item::Error)),
            "invalid display.timestamp_format {format:?}"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            host = "irc.example.net"
            nickname = "bob"

            [display]
            verbose = true
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "irc.example.net");
        assert_eq!(config.server.port, 6667);
        assert_eq!(config.server.realname(), "bob");
        assert!(config.display.verbose);
        assert_eq!(config.display.message, "{target}< {source}> {body}");
        assert_eq!(config.colors.chan_color, "red+b");
        assert!(config.colors.auto_color);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = AppConfig::default();
        let cli = Cli {
            host: Some("irc.example.org".into()),
            port: Some(6697),
            nick: Some("carol".into()),
            auto_color: Some(false),
            verbose: true,
            ..Cli::default()
        };
        config.apply_cli(&cli);
        assert_eq!(config.server.host, "irc.example.org");
        assert_eq!(config.server.port, 6697);
        assert_eq!(config.server.nickname, "carol");
        assert!(!config.colors.auto_color);
        assert!(config.display.verbose);
        assert_eq!(config.colors.self_color, "cyan+b");
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        config.server.nickname = "bob".into();
        assert!(config.validate().is_ok());

        config.server.nickname = "bad nick".into();
        assert!(config.validate().is_err());

        config.server.nickname = "bob".into();
        config.colors.chan_color = "mauve".into();
        assert!(config.validate().is_err());

        config.colors.chan_color = "red".into();
        config.logging.level = "loud".into();
        assert!(config.validate().is_err());

        config.logging.level = "debug".into();
        config.display.timestamp_format = "%H:%".into();
        assert!(config.validate().is_err());

        config.display.timestamp_format = String::new();
        assert!(config.validate().is_ok());
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 7000\n[colors]\nauto_color = false").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 7000);
        assert!(!config.colors.auto_color);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }
}
