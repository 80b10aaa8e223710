//! cheerlights-poller: periodic color polling.
//! Owns the repeating timer, issues fetches through an injected
//! [`ColorFetcher`], and writes each result into a shared [`Document`].

pub mod poller;
pub mod stats;

pub use cheerlights_core::{ColorUpdate, Document, PollerConfig};
pub use cheerlights_http::{ColorFetcher, FetchError};
pub use poller::{Poller, PollerState, SharedDocument, shared_document};
pub use stats::PollStats;
