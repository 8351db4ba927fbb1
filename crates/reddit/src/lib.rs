pub mod models;

use async_trait::async_trait;
use common::{Config, CrawlerError, CrawlerResult, TrendSource};
use models::Listing;
use reqwest::Client;
use tracing::info;

const USER_AGENT: &str = "DailyBlogBot/0.1";

/// Post titles from the front page of Reddit.
#[derive(Clone)]
pub struct RedditTrends {
    client: Client,
    url: String,
}

impl RedditTrends {
    pub fn new(url: &str) -> CrawlerResult<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> CrawlerResult<Self> {
        Self::new(&config.sources.reddit_url)
    }
}

#[async_trait]
impl TrendSource for RedditTrends {
    async fn fetch_topics(&self) -> CrawlerResult<Vec<String>> {
        info!("Fetching Reddit trends from {}", self.url);
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CrawlerError::Api(format!("Reddit returned {}", status)));
        }

        let listing: Listing = resp.json().await?;
        Ok(listing.into_titles())
    }

    fn name(&self) -> &'static str {
        "Reddit"
    }
}
