//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod color_scheme;
mod preference_storage;
mod user_directory_source;

#[cfg(test)]
pub use color_scheme::MockColorSchemeSignal;
pub use color_scheme::{ColorSchemeSignal, FixedColorScheme};
#[cfg(test)]
pub use preference_storage::MockPreferenceStorage;
pub use preference_storage::{
    InMemoryPreferenceStorage, PreferenceStorage, PreferenceStorageError,
};
#[cfg(test)]
pub use user_directory_source::MockUserDirectorySource;
pub use user_directory_source::{
    DirectoryError, FixtureUserDirectorySource, UserDirectorySource, UserListRequest,
};
