//! HTTP transport layer

pub mod transport;

pub use transport::{Transport, TransportBuilder};
