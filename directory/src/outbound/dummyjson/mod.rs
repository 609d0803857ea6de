//! `DummyJSON` outbound adapter.
//!
//! Thin HTTP implementation of the `UserDirectorySource` port.

mod http_source;

pub use http_source::{DummyJsonHttpSource, DummyJsonSourceError};
