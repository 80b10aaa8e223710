//! cheerlights-http: network IO boundary.
//! A fetch trait for mock injection and the reqwest-backed implementation.
//! No document logic.

pub mod error;
pub mod fetcher;

pub use error::FetchError;
pub use fetcher::{ColorFetcher, DEFAULT_TIMEOUT, HttpFetcher};
