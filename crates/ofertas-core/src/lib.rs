pub mod config;
pub mod offer;
pub mod sink;

pub use config::{ConfigError, ScrapeConfig};
pub use offer::OfferRecord;
pub use sink::{OfferSink, SinkError};
