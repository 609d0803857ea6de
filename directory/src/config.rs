//! Runtime configuration loaded via OrthoConfig.
//!
//! Values come from `USER_DIRECTORY_*` environment variables or a
//! configuration file. The timeout carries its default in the derive; the
//! remaining fields are optional and the accessors supply their defaults.

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::Theme;
use crate::domain::preferences::UnknownTheme;

const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
const DEFAULT_STATE_DIR: &str = ".user-directory";

/// Settings for the directory client and local preference storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct DirectorySettings {
    /// Base URL of the remote user service.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[ortho_config(default = 10)]
    pub timeout_secs: u64,
    /// Directory holding preference files.
    pub state_dir: Option<String>,
    /// Force the system colour scheme to `light` or `dark`.
    pub color_scheme: Option<String>,
}

impl DirectorySettings {
    /// Return the configured base URL, falling back to the public service.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured value is not a URL.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
    }

    /// Return the request timeout; zero is raised to one second.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Return the preference directory, relative paths resolving against the
    /// working directory.
    #[must_use]
    pub fn state_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.state_dir.as_deref().unwrap_or(DEFAULT_STATE_DIR))
    }

    /// Return the forced colour scheme, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownTheme`] for values other than `light` and `dark`.
    pub fn color_scheme_override(&self) -> Result<Option<Theme>, UnknownTheme> {
        self.color_scheme
            .as_deref()
            .map(str::parse)
            .transpose()
    }
}
