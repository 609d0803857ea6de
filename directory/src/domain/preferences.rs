//! Persisted preferences: favourite users and the display theme.
//!
//! Each preference is loaded once from [`PreferenceStorage`] and then served
//! from memory. Storage is best-effort: unreadable or malformed values fall
//! back to a default, and failed writes are logged while the in-memory change
//! stands for the rest of the session.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::UserId;
use super::ports::{ColorSchemeSignal, PreferenceStorage};

/// Storage key holding the favourite user ids.
pub const FAVORITES_KEY: &str = "user-favorites";
/// Storage key holding the theme literal.
pub const THEME_KEY: &str = "app-theme";

/// A stored preference value could not be decoded or encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {key} value: {message}")]
pub struct PreferenceCodecError {
    key: &'static str,
    message: String,
}

impl PreferenceCodecError {
    fn new(key: &'static str, message: impl Into<String>) -> Self {
        Self {
            key,
            message: message.into(),
        }
    }
}

/// A value persisted under a fixed storage key.
pub trait Preference: Sized {
    /// Storage key.
    const KEY: &'static str;

    /// Parse the stored representation.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceCodecError`] for values of the wrong shape.
    fn decode(raw: &str) -> Result<Self, PreferenceCodecError>;

    /// Produce the stored representation.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceCodecError`] when the value cannot be serialised.
    fn encode(&self) -> Result<String, PreferenceCodecError>;
}

/// Whether the last change reached durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    Yes,
    No,
}

/// A preference value seeded from storage and written back on every change.
#[derive(Debug)]
pub struct PreferenceStore<P, S> {
    storage: S,
    value: P,
}

impl<P, S> PreferenceStore<P, S>
where
    P: Preference,
    S: PreferenceStorage,
{
    /// Read the stored value, using `fallback` when it is missing, unreadable
    /// or malformed. Never fails.
    pub fn load(storage: S, fallback: impl FnOnce() -> P) -> Self {
        let value = match storage.read(P::KEY) {
            Ok(Some(raw)) => P::decode(&raw).unwrap_or_else(|error| {
                warn!(key = P::KEY, %error, "discarding malformed preference");
                fallback()
            }),
            Ok(None) => {
                debug!(key = P::KEY, "no stored preference, using default");
                fallback()
            }
            Err(error) => {
                warn!(key = P::KEY, %error, "preference storage unreadable, using default");
                fallback()
            }
        };
        Self { storage, value }
    }

    /// Current in-memory value.
    pub const fn get(&self) -> &P {
        &self.value
    }

    /// Apply `change` in memory, then persist the result.
    ///
    /// A failed write is logged and reported as [`Persisted::No`]; the
    /// in-memory change is kept either way.
    pub fn mutate(&mut self, change: impl FnOnce(&mut P)) -> Persisted {
        change(&mut self.value);
        self.persist()
    }

    fn persist(&self) -> Persisted {
        let encoded = match self.value.encode() {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(key = P::KEY, %error, "preference could not be encoded");
                return Persisted::No;
            }
        };
        match self.storage.write(P::KEY, &encoded) {
            Ok(()) => {
                debug!(key = P::KEY, "preference persisted");
                Persisted::Yes
            }
            Err(error) => {
                warn!(key = P::KEY, %error, "preference not persisted, keeping in-memory value");
                Persisted::No
            }
        }
    }
}

/// Set of favourite user ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Favorites(BTreeSet<UserId>);

impl Favorites {
    #[must_use]
    pub fn contains(&self, id: UserId) -> bool {
        self.0.contains(&id)
    }

    /// Flip membership of `id`, returning whether it is now a favourite.
    pub fn toggle(&mut self, id: UserId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = UserId> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<UserId> for Favorites {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Preference for Favorites {
    const KEY: &'static str = FAVORITES_KEY;

    /// Accepts a JSON array of positive integers; anything else is malformed.
    fn decode(raw: &str) -> Result<Self, PreferenceCodecError> {
        let ids: Vec<u64> = serde_json::from_str(raw)
            .map_err(|error| PreferenceCodecError::new(Self::KEY, error.to_string()))?;
        ids.into_iter()
            .map(|id| {
                UserId::from_u64(id)
                    .ok_or_else(|| PreferenceCodecError::new(Self::KEY, "user id 0 is not valid"))
            })
            .collect()
    }

    fn encode(&self) -> Result<String, PreferenceCodecError> {
        serde_json::to_string(self)
            .map_err(|error| PreferenceCodecError::new(Self::KEY, error.to_string()))
    }
}

/// Display theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing a theme name other than `light` or `dark`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {input:?}; expected light or dark")]
pub struct UnknownTheme {
    input: String,
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme {
                input: other.to_owned(),
            }),
        }
    }
}

impl Preference for Theme {
    const KEY: &'static str = THEME_KEY;

    fn decode(raw: &str) -> Result<Self, PreferenceCodecError> {
        raw.trim()
            .parse()
            .map_err(|error: UnknownTheme| PreferenceCodecError::new(Self::KEY, error.to_string()))
    }

    fn encode(&self) -> Result<String, PreferenceCodecError> {
        Ok(self.as_str().to_owned())
    }
}

/// Outcome of toggling a favourite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteToggle {
    /// Membership after the toggle.
    pub is_favorite: bool,
    pub persisted: Persisted,
}

/// Favourite users, persisted under [`FAVORITES_KEY`].
#[derive(Debug)]
pub struct FavoritesStore<S> {
    inner: PreferenceStore<Favorites, S>,
}

impl<S: PreferenceStorage> FavoritesStore<S> {
    /// Load favourites; missing or corrupt storage yields an empty set.
    pub fn load(storage: S) -> Self {
        Self {
            inner: PreferenceStore::load(storage, Favorites::default),
        }
    }

    pub fn toggle(&mut self, id: UserId) -> FavoriteToggle {
        let mut is_favorite = false;
        let persisted = self.inner.mutate(|favorites| {
            is_favorite = favorites.toggle(id);
        });
        FavoriteToggle {
            is_favorite,
            persisted,
        }
    }

    #[must_use]
    pub fn is_favorite(&self, id: UserId) -> bool {
        self.inner.get().contains(id)
    }

    /// Current favourites.
    pub const fn get(&self) -> &Favorites {
        self.inner.get()
    }

    pub fn ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.inner.get().iter()
    }
}

/// Display theme, persisted under [`THEME_KEY`].
#[derive(Debug)]
pub struct ThemeStore<S> {
    inner: PreferenceStore<Theme, S>,
}

impl<S: PreferenceStorage> ThemeStore<S> {
    /// Load the theme.
    ///
    /// The colour-scheme signal is only consulted when no valid theme is
    /// stored; without a signal the theme is light.
    pub fn load(storage: S, signal: &dyn ColorSchemeSignal) -> Self {
        Self {
            inner: PreferenceStore::load(storage, || {
                signal.preferred_theme().unwrap_or_default()
            }),
        }
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        *self.inner.get()
    }

    pub fn set(&mut self, theme: Theme) -> Persisted {
        self.inner.mutate(|current| *current = theme)
    }

    /// Flip between light and dark.
    pub fn toggle(&mut self) -> Persisted {
        self.inner.mutate(|current| *current = current.toggled())
    }
}

#[cfg(test)]
#[path = "preferences_tests.rs"]
mod tests;
