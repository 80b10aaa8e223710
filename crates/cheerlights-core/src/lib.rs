//! cheerlights-core: pure types shared by the poller and the runtime.
//! Configuration, color updates, the tagged-element document, and the
//! clock seam. No IO.

pub mod clock;
pub mod dom;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use dom::{COLOR_SINK_CLASS, Document, Element, UPDATE_SINK_CLASS, format_update_text};
pub use types::{ColorUpdate, ConfigError, DEFAULT_ENDPOINT, DEFAULT_PERIOD_MS, PollerConfig};
