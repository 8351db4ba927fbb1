use std::path::PathBuf;

use anyhow::{Context, Result};
use blog_post::{BlogPost, PostWriter};
use common::{Config, ContentGenerator, GeneratorKind, Publisher, TrendCollector};
use google_trends::GoogleTrends;
use news_api::NewsApiTrends;
use openai::ModelGenerator;
use publisher::GitPublisher;
use reddit::RedditTrends;
use time::{OffsetDateTime, UtcOffset};
use tracing::{error, info, warn};
use wikipedia::WikipediaSummaries;

type Clock = Box<dyn Fn() -> OffsetDateTime + Send + Sync>;

#[derive(Debug, Default)]
pub struct RunSummary {
    pub topics_collected: usize,
    pub posts_written: Vec<PathBuf>,
    pub published: bool,
}

/// collect -> generate/write for the first `max_posts` topics -> publish.
pub struct Pipeline {
    collector: TrendCollector,
    generator: Box<dyn ContentGenerator>,
    writer: PostWriter,
    publisher: Box<dyn Publisher>,
    max_posts: usize,
    clock: Clock,
}

impl Pipeline {
    pub fn new(
        collector: TrendCollector,
        generator: Box<dyn ContentGenerator>,
        writer: PostWriter,
        publisher: Box<dyn Publisher>,
        max_posts: usize,
    ) -> Self {
        Self {
            collector,
            generator,
            writer,
            publisher,
            max_posts,
            clock: Box::new(OffsetDateTime::now_utc),
        }
    }

    /// Wires up the real sources, generator and publisher. Expects a validated config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut collector = TrendCollector::new()
            .add_source(Box::new(RedditTrends::from_config(config)?))
            .add_source(Box::new(GoogleTrends::from_config(config)));

        if config.sources.news_api_key.is_some() {
            collector = collector.add_source(Box::new(NewsApiTrends::from_config(config)?));
        } else {
            warn!("NEWS_API_KEY not set; skipping NewsAPI headlines");
        }

        let generator: Box<dyn ContentGenerator> = match config.generator {
            GeneratorKind::Cached => Box::new(ModelGenerator::from_config(config, true)?),
            GeneratorKind::Uncached => Box::new(ModelGenerator::from_config(config, false)?),
            GeneratorKind::Wikipedia => Box::new(WikipediaSummaries::from_config(config)?),
        };

        Ok(Self::new(
            collector,
            generator,
            PostWriter::from_config(config),
            Box::new(GitPublisher::from_config(config)),
            config.max_posts,
        ))
    }

    /// Timestamps posts in the given offset instead of UTC.
    pub fn with_utc_offset(self, offset: UtcOffset) -> Self {
        self.with_clock(move || OffsetDateTime::now_utc().to_offset(offset))
    }

    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> OffsetDateTime + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// Only a failed post write aborts the run. Publish failures are logged
    /// and leave the written posts in place.
    pub async fn run(&self) -> Result<RunSummary> {
        let topics = self.collector.collect().await;
        let mut summary = RunSummary {
            topics_collected: topics.len(),
            ..RunSummary::default()
        };

        for topic in topics.into_iter().take(self.max_posts) {
            info!("Generating blog post for topic: {}", topic);
            let body = self.generator.generate(&topic).await;
            let post = BlogPost::new(topic, body);

            let path = self
                .writer
                .write(&post, (self.clock)())
                .await
                .with_context(|| format!("failed to write post for '{}'", post.title))?;
            summary.posts_written.push(path);
        }

        match self.publisher.publish().await {
            Ok(()) => summary.published = true,
            Err(e) => error!("An error occurred while publishing posts: {}", e),
        }

        Ok(summary)
    }
}
