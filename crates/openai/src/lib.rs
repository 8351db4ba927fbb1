pub mod cache;
pub mod client;
pub mod models;

use async_trait::async_trait;
use common::{Config, ContentGenerator, CrawlerResult, PLACEHOLDER_CONTENT};
use tracing::{info, warn};

pub use cache::{CachedContent, ContentCache};
pub use client::ChatClient;

/// Writes post bodies with a chat-completion model, optionally through a
/// [`ContentCache`].
pub struct ModelGenerator {
    client: ChatClient,
    cache: Option<ContentCache>,
}

impl ModelGenerator {
    pub fn uncached(client: ChatClient) -> Self {
        Self { client, cache: None }
    }

    pub fn cached(client: ChatClient, cache: ContentCache) -> Self {
        Self {
            client,
            cache: Some(cache),
        }
    }

    pub fn from_config(config: &Config, with_cache: bool) -> CrawlerResult<Self> {
        let api_key = config.require_openai_api_key()?;
        let client = ChatClient::new(api_key, &config.openai);
        Ok(if with_cache {
            Self::cached(client, ContentCache::new(&config.cache_path))
        } else {
            Self::uncached(client)
        })
    }

    async fn ask_model(&self, topic: &str) -> Option<String> {
        match self.client.write_post(topic).await {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("An error occurred while generating content for '{}': {}", topic, e);
                None
            }
        }
    }

    async fn generate_cached(&self, cache: &ContentCache, topic: &str) -> String {
        let mut entries = match cache.load().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Ignoring unreadable cache {}; it will be replaced on the next successful generation: {}",
                    cache.path().display(),
                    e
                );
                CachedContent::new()
            }
        };

        if let Some(content) = entries.get(topic) {
            info!("Using cached content for topic: {}", topic);
            return content.clone();
        }

        let Some(content) = self.ask_model(topic).await else {
            return PLACEHOLDER_CONTENT.to_string();
        };

        entries.insert(topic.to_string(), content.clone());
        if let Err(e) = cache.save(&entries).await {
            warn!("Failed to save cache {}: {}", cache.path().display(), e);
        }
        content
    }
}

#[async_trait]
impl ContentGenerator for ModelGenerator {
    async fn generate(&self, topic: &str) -> String {
        match &self.cache {
            Some(cache) => self.generate_cached(cache, topic).await,
            None => self
                .ask_model(topic)
                .await
                .unwrap_or_else(|| PLACEHOLDER_CONTENT.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        if self.cache.is_some() {
            "cached model"
        } else {
            "model"
        }
    }
}
