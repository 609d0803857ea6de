//! Domain model, rules and ports.
//!
//! Public surface:
//! - [`User`] and [`UserId`]: validated directory records.
//! - [`validation`]: turns untyped JSON into users or field-level violations.
//! - [`listing`]: filter, sort and paginate fetched users.
//! - [`preferences`]: favourite users and the display theme.
//! - [`UserDirectoryService`]: read operations over a [`ports::UserDirectorySource`].

pub mod directory_service;
pub mod fetch_state;
pub mod listing;
pub mod ports;
pub mod preferences;
pub mod user;
pub mod validation;

pub use self::directory_service::UserDirectoryService;
pub use self::fetch_state::{FetchGeneration, FetchSlot, FetchTicket, LoadState};
pub use self::listing::{ListingState, SearchQuery, SortOption};
pub use self::preferences::{
    FavoriteToggle, Favorites, FavoritesStore, Persisted, Theme, ThemeStore,
};
pub use self::user::{
    Address, Bank, Company, Coordinates, Crypto, Hair, User, UserDetails, UserId, UserIdError,
};
pub use self::validation::{
    FieldViolation, UserCollection, ValidationError, validate_collection, validate_user,
};
