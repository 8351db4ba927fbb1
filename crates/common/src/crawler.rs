use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::CrawlerResult;

/// A feed that yields trending topic titles.
#[async_trait]
pub trait TrendSource: Send + Sync {
    async fn fetch_topics(&self) -> CrawlerResult<Vec<String>>;
    fn name(&self) -> &'static str;
}

/// Turns a topic into post body text. Failures degrade to a fixed string
/// instead of an error so one topic cannot stop the run.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, topic: &str) -> String;
    fn name(&self) -> &'static str;
}

/// Pushes the written posts somewhere public.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self) -> CrawlerResult<()>;
}

/// Queries every registered source in order and concatenates their topics.
pub struct TrendCollector {
    sources: Vec<Box<dyn TrendSource>>,
}

impl TrendCollector {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn add_source(mut self, source: Box<dyn TrendSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// A failing source contributes nothing; it never aborts the collection.
    pub async fn collect(&self) -> Vec<String> {
        let mut topics = Vec::new();

        for source in &self.sources {
            match source.fetch_topics().await {
                Ok(found) => {
                    info!("{} returned {} topics", source.name(), found.len());
                    topics.extend(found);
                }
                Err(e) => {
                    warn!("{} failed, skipping: {}", source.name(), e);
                }
            }
        }

        info!("Collected {} trending topics", topics.len());
        topics
    }
}

impl Default for TrendCollector {
    fn default() -> Self {
        Self::new()
    }
}
