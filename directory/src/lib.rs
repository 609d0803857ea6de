//! User directory browser library.
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] holds the user model, the record validator, the listing
//!   pipeline, the preference stores and the ports adapters must implement.
//! - [`outbound`] provides the driven adapters: the `DummyJSON` HTTP source,
//!   file-backed preference storage and the terminal colour-scheme signal.
//! - [`inbound`] exposes the command-line surface used by the binary.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use config::DirectorySettings;
