//! Transport error conversions

pub mod conversions;

pub use conversions::TransportError;
