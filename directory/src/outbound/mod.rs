//! Outbound adapters implementing the domain ports.

pub mod color_scheme;
pub mod dummyjson;
pub mod preferences;
