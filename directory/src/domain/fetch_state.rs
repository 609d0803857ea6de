//! Load state for views that fetch remote data.
//!
//! A view starts a fetch with [`FetchSlot::begin`] and hands the result back
//! with [`FetchSlot::complete`]. Results that arrive after a newer fetch
//! started, or after the view retired its generation, are dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Lifecycle of one fetched value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    /// The fetch failed; holds the message to show.
    Failed(String),
}

impl<T> LoadState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loaded value, if any.
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Loading | Self::Failed(_) => None,
        }
    }
}

/// Identifies one fetch within a [`FetchGeneration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Monotonic fetch counter shared between a view and its in-flight fetches.
#[derive(Debug, Default)]
pub struct FetchGeneration {
    current: AtomicU64,
}

impl FetchGeneration {
    /// Start a new fetch, superseding every earlier ticket.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.current.fetch_add(1, Ordering::AcqRel).wrapping_add(1))
    }

    /// Invalidate every outstanding ticket, e.g. when the view goes away.
    pub fn retire(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }

    /// Whether results for `ticket` are still wanted.
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.current.load(Ordering::Acquire) == ticket.0
    }
}

/// Load state plus the generation guarding it.
#[derive(Debug)]
pub struct FetchSlot<T> {
    generation: FetchGeneration,
    state: LoadState<T>,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self {
            generation: FetchGeneration::default(),
            state: LoadState::Loading,
        }
    }
}

impl<T> FetchSlot<T> {
    #[must_use]
    pub const fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Enter [`LoadState::Loading`] and return the ticket for the new fetch.
    pub fn begin(&mut self) -> FetchTicket {
        self.state = LoadState::Loading;
        self.generation.begin()
    }

    /// Record the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when the ticket is
    /// stale.
    pub fn complete<E: std::fmt::Display>(
        &mut self,
        ticket: FetchTicket,
        result: Result<T, E>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            debug!(?ticket, "discarding superseded fetch result");
            return false;
        }
        self.state = match result {
            Ok(value) => LoadState::Loaded(value),
            Err(error) => LoadState::Failed(error.to_string()),
        };
        true
    }

    /// Drop interest in any outstanding fetch.
    pub fn retire(&self) {
        self.generation.retire();
    }

    /// Take the loaded value out of the slot, leaving it loading.
    pub fn take(&mut self) -> LoadState<T> {
        std::mem::replace(&mut self.state, LoadState::Loading)
    }
}
