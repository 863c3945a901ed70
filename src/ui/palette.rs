//! Label colorizing.
//!
//! Colors are written as mIRC formatting codes so that locally decorated
//! labels and formatting sent by other users go through the same span parser
//! in [`crate::ui::mirc_colors`].

use crate::config::model::ColorConfig;
use thiserror::Error;

/// Number of entries in the mIRC base palette.
pub const PALETTE_SIZE: u8 = 16;

/// Names for the palette entries, by index.
pub const COLOR_NAMES: [&str; PALETTE_SIZE as usize] = [
    "white",
    "black",
    "blue",
    "green",
    "red",
    "brown",
    "purple",
    "orange",
    "yellow",
    "lightgreen",
    "cyan",
    "lightcyan",
    "lightblue",
    "pink",
    "grey",
    "lightgrey",
];

const BOLD: char = '\x02';
const COLOR: char = '\x03';
const RESET: char = '\x0F';

/// The kinds of label that get their own color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    SelfNick,
    Others,
    Channel,
    Error,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("unknown color {0:?} (expected a name like \"cyan\" or an index 0-15, optionally with \"+b\")")]
    Unknown(String),
}

/// How one class of label is decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpec {
    /// Left as is.
    Plain,
    /// Palette entry derived from the label text itself.
    Auto,
    Fixed { index: u8, bold: bool },
}

impl ColorSpec {
    /// Parse `name[+b]` or `index[+b]`. An empty spec is [`ColorSpec::Auto`]
    /// when `auto` is set and [`ColorSpec::Plain`] otherwise.
    pub fn parse(spec: &str, auto: bool) -> Result<Self, ColorError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Ok(if auto { Self::Auto } else { Self::Plain });
        }
        let (name, bold) = match spec.strip_suffix("+b") {
            Some(name) => (name, true),
            None => (spec, false),
        };
        let name = name.to_ascii_lowercase();
        let index = match name.parse::<u8>() {
            Ok(index) if index < PALETTE_SIZE => Some(index),
            Ok(_) => None,
            Err(_) => COLOR_NAMES
                .iter()
                .position(|candidate| *candidate == name)
                .map(|index| index as u8),
        };
        index
            .map(|index| Self::Fixed { index, bold })
            .ok_or_else(|| ColorError::Unknown(spec.to_string()))
    }
}

/// Deterministic palette entry for `text`: the sum of its char codes modulo
/// the palette size. The same label always gets the same color.
pub fn auto_index(text: &str) -> u8 {
    let sum = text
        .chars()
        .fold(0u64, |acc, c| acc.wrapping_add(u64::from(c)));
    (sum % u64::from(PALETTE_SIZE)) as u8
}

/// Color settings for every [`ColorClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub self_nick: ColorSpec,
    pub others: ColorSpec,
    pub channel: ColorSpec,
    pub error: ColorSpec,
}

impl Palette {
    /// Palette that leaves every label undecorated.
    pub const PLAIN: Palette = Palette {
        self_nick: ColorSpec::Plain,
        others: ColorSpec::Plain,
        channel: ColorSpec::Plain,
        error: ColorSpec::Plain,
    };

    pub fn from_config(config: &ColorConfig) -> Result<Self, ColorError> {
        let auto = config.auto_color;
        Ok(Self {
            self_nick: ColorSpec::parse(&config.self_color, auto)?,
            others: ColorSpec::parse(&config.nick_color, auto)?,
            channel: ColorSpec::parse(&config.chan_color, auto)?,
            error: ColorSpec::parse(&config.error_color, auto)?,
        })
    }

    fn spec(&self, class: ColorClass) -> ColorSpec {
        match class {
            ColorClass::SelfNick => self.self_nick,
            ColorClass::Others => self.others,
            ColorClass::Channel => self.channel,
            ColorClass::Error => self.error,
        }
    }

    pub fn colorize(&self, class: ColorClass, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let (index, bold) = match self.spec(class) {
            ColorSpec::Plain => return text.to_string(),
            ColorSpec::Auto => (auto_index(text), false),
            ColorSpec::Fixed { index, bold } => (index, bold),
        };
        let mut out = String::with_capacity(text.len() + 6);
        if bold {
            out.push(BOLD);
        }
        out.push(COLOR);
        out.push_str(&format!("{index:02}"));
        out.push_str(text);
        out.push(RESET);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_indexes() {
        assert_eq!(
            ColorSpec::parse("cyan+b", true),
            Ok(ColorSpec::Fixed {
                index: 10,
                bold: true
            })
        );
        assert_eq!(
            ColorSpec::parse("Red", false),
            Ok(ColorSpec::Fixed {
                index: 4,
                bold: false
            })
        );
        assert_eq!(
            ColorSpec::parse("12", false),
            Ok(ColorSpec::Fixed {
                index: 12,
                bold: false
            })
        );
        assert_eq!(ColorSpec::parse("", true), Ok(ColorSpec::Auto));
        assert_eq!(ColorSpec::parse("  ", false), Ok(ColorSpec::Plain));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(ColorSpec::parse("chartreuse", true).is_err());
        assert!(ColorSpec::parse("16", true).is_err());
        assert!(ColorSpec::parse("+b", true).is_err());
    }

    #[test]
    fn test_auto_index_is_deterministic() {
        assert_eq!(auto_index("carol"), auto_index("carol"));
        // 'a' (97) + 'b' (98) = 195, 195 % 16 = 3
        assert_eq!(auto_index("ab"), 3);
        assert!(auto_index("anything at all") < PALETTE_SIZE);
    }

    #[test]
    fn test_colorize_fixed_and_auto() {
        let palette = Palette {
            self_nick: ColorSpec::Fixed {
                index: 10,
                bold: true,
            },
            others: ColorSpec::Auto,
            channel: ColorSpec::Fixed {
                index: 4,
                bold: false,
            },
            error: ColorSpec::Plain,
        };
        assert_eq!(
            palette.colorize(ColorClass::SelfNick, "bob"),
            "\x02\x0310bob\x0F"
        );
        assert_eq!(palette.colorize(ColorClass::Channel, "#x"), "\x0304#x\x0F");
        assert_eq!(palette.colorize(ColorClass::Others, "ab"), "\x0303ab\x0F");
        assert_eq!(palette.colorize(ColorClass::Error, "ERROR"), "ERROR");
        assert_eq!(palette.colorize(ColorClass::Channel, ""), "");
    }

    #[test]
    fn test_from_config() {
        let config = ColorConfig::default();
        let palette = Palette::from_config(&config).unwrap();
        assert_eq!(
            palette.self_nick,
            ColorSpec::Fixed {
                index: 10,
                bold: true
            }
        );
        assert_eq!(palette.others, ColorSpec::Auto);
    }
}
