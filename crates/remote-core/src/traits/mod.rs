//! Core traits for talking to the Panel.

mod transport;

pub use transport::{Query, Response, Transport};
