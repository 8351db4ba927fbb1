use async_trait::async_trait;
use common::{Config, ContentGenerator, CrawlerError, CrawlerResult, PLACEHOLDER_CONTENT};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{info, warn};

pub const NOT_FOUND_CONTENT: &str = "No summary found for this topic.";

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: String,
}

/// Uses the lead paragraph of the matching Wikipedia article as the post body.
pub struct WikipediaSummaries {
    client: Client,
    base_url: String,
}

impl WikipediaSummaries {
    pub fn new(base_url: &str) -> CrawlerResult<Self> {
        let client = Client::builder().user_agent("DailyBlogBot/0.1").build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> CrawlerResult<Self> {
        Self::new(&config.wikipedia_base_url)
    }

    fn summary_url(&self, topic: &str) -> CrawlerResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| CrawlerError::Parse(format!("bad Wikipedia URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| CrawlerError::Parse(format!("Wikipedia URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(["page", "summary", topic]);
        Ok(url)
    }

    /// `Ok(None)` when no article exists for the topic.
    pub async fn fetch_summary(&self, topic: &str) -> CrawlerResult<Option<String>> {
        let url = self.summary_url(topic)?;
        info!("Looking up Wikipedia summary: {}", url);

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CrawlerError::Api(format!("Wikipedia returned {}", status)));
        }

        let page: PageSummary = resp.json().await?;
        let extract = page.extract.trim();
        Ok((!extract.is_empty()).then(|| extract.to_string()))
    }
}

#[async_trait]
impl ContentGenerator for WikipediaSummaries {
    async fn generate(&self, topic: &str) -> String {
        match self.fetch_summary(topic).await {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                info!("No Wikipedia article for '{}'", topic);
                NOT_FOUND_CONTENT.to_string()
            }
            Err(e) => {
                warn!("Wikipedia lookup failed for '{}': {}", topic, e);
                PLACEHOLDER_CONTENT.to_string()
            }
        }
    }

    fn name(&self) -> &'static str {
        "wikipedia"
    }
}
