//! Durable preference storage adapters.

mod atomic_io;
mod file_storage;

pub use file_storage::FilePreferenceStorage;
