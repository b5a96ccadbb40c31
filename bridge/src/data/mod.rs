//! External data boundaries
//!
//! - `scrape` - Prometheus exposition client and parser adapter
//! - `intake` - Datadog series submission
//! - `types` - Types flowing through one cycle
//! - `error` - Scrape and intake error types

pub mod error;
pub mod intake;
pub mod scrape;
pub mod types;

pub use error::{IntakeError, ScrapeError};
pub use intake::{DatadogClient, SubmissionClient};
pub use scrape::ScrapeClient;
