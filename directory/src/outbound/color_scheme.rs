//! Terminal colour-scheme signal.
//!
//! Terminals such as rxvt, Konsole and iTerm export `COLORFGBG` as
//! `"<fg>;<bg>"` (sometimes `"<fg>;<default>;<bg>"`). The last field is the
//! background palette index: 0 to 6 and 8 are dark colours.

use std::env;

use tracing::debug;

use crate::domain::Theme;
use crate::domain::ports::ColorSchemeSignal;

/// Environment variable carrying the terminal palette.
pub const COLORFGBG_VAR: &str = "COLORFGBG";

/// Colour-scheme signal derived from the terminal background colour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalColorScheme {
    colorfgbg: Option<String>,
}

impl TerminalColorScheme {
    /// Capture `COLORFGBG` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_value(env::var(COLORFGBG_VAR).ok())
    }

    /// Use an explicit `COLORFGBG` value.
    #[must_use]
    pub fn from_value(colorfgbg: Option<String>) -> Self {
        Self { colorfgbg }
    }
}

impl ColorSchemeSignal for TerminalColorScheme {
    fn preferred_theme(&self) -> Option<Theme> {
        let raw = self.colorfgbg.as_deref()?;
        let theme = background_theme(raw);
        debug!(colorfgbg = raw, ?theme, "read terminal colour scheme");
        theme
    }
}

fn background_theme(raw: &str) -> Option<Theme> {
    let background: u8 = raw.rsplit(';').next()?.trim().parse().ok()?;
    match background {
        0..=6 | 8 => Some(Theme::Dark),
        7 | 9..=15 => Some(Theme::Light),
        _ => None,
    }
}
