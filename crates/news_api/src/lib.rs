pub mod models;

use async_trait::async_trait;
use common::{Config, CrawlerError, CrawlerResult, TrendSource};
use models::TopHeadlines;
use reqwest::Client;
use tracing::info;

const COUNTRY: &str = "us";

/// Top US headlines from NewsAPI.
pub struct NewsApiTrends {
    client: Client,
    url: String,
    api_key: String,
}

impl NewsApiTrends {
    pub fn new(url: &str, api_key: &str) -> CrawlerResult<Self> {
        let client = Client::builder().user_agent("DailyBlogBot/0.1").build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> CrawlerResult<Self> {
        let api_key = config.require_news_api_key()?;
        Self::new(&config.sources.news_api_url, api_key)
    }
}

#[async_trait]
impl TrendSource for NewsApiTrends {
    async fn fetch_topics(&self) -> CrawlerResult<Vec<String>> {
        info!("Fetching top headlines from {}", self.url);
        let resp = self
            .client
            .get(&self.url)
            .query(&[("country", COUNTRY), ("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CrawlerError::Api(format!("NewsAPI returned {}", status)));
        }

        let headlines: TopHeadlines = resp.json().await?;
        Ok(headlines.into_titles())
    }

    fn name(&self) -> &'static str {
        "NewsAPI"
    }
}
