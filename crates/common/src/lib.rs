pub mod config;
pub mod crawler;
pub mod error;

pub use config::{Config, GeneratorKind};
pub use crawler::{ContentGenerator, Publisher, TrendCollector, TrendSource};
pub use error::{CrawlerError, CrawlerResult};

/// Body used when content generation fails for any reason.
pub const PLACEHOLDER_CONTENT: &str =
    "No content generated due to API quota exceeded or other errors.";
