//! Port for the system colour-scheme preference.

use crate::domain::Theme;

/// Reports the theme the surrounding system prefers, if it expresses one.
#[cfg_attr(test, mockall::automock)]
pub trait ColorSchemeSignal: Send + Sync {
    /// Preferred theme, or `None` when the system gives no signal.
    fn preferred_theme(&self) -> Option<Theme>;
}

/// Signal with a fixed answer, used for configuration overrides and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedColorScheme(pub Option<Theme>);

impl ColorSchemeSignal for FixedColorScheme {
    fn preferred_theme(&self) -> Option<Theme> {
        self.0
    }
}
