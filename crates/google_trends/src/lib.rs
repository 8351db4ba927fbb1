use async_trait::async_trait;
use common::{Config, CrawlerError, CrawlerResult, TrendSource};
use feed_rs::parser;
use reqwest::Client;
use tracing::{debug, info};

/// Daily search trends from the Google Trends RSS feed.
pub struct GoogleTrends {
    client: Client,
    url: String,
}

impl GoogleTrends {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.sources.google_trends_url)
    }
}

/// Entry titles of an RSS or Atom document, in feed order. Untitled entries are skipped.
pub fn parse_titles(content: &[u8]) -> CrawlerResult<Vec<String>> {
    let feed = parser::parse(content)
        .map_err(|e| CrawlerError::Parse(format!("Failed to parse trends feed: {}", e)))?;

    debug!("Trends feed has {} entries", feed.entries.len());
    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| entry.title.map(|t| t.content))
        .filter(|title| !title.trim().is_empty())
        .collect())
}

#[async_trait]
impl TrendSource for GoogleTrends {
    async fn fetch_topics(&self) -> CrawlerResult<Vec<String>> {
        info!("Fetching Google Trends feed from {}", self.url);
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CrawlerError::Api(format!("Google Trends returned {}", status)));
        }

        let body = resp.bytes().await?;
        parse_titles(&body)
    }

    fn name(&self) -> &'static str {
        "Google Trends"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:ht="https://trends.google.com/trends/trendingsearches/daily">
  <channel>
    <title>Daily Search Trends</title>
    <link>https://trends.google.com/trends/trendingsearches/daily?geo=US</link>
    <description>Recent searches</description>
    <item>
      <title>World Series</title>
      <ht:approx_traffic>500,000+</ht:approx_traffic>
    </item>
    <item>
      <title>Solar eclipse</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_titles() {
        let titles = parse_titles(FEED.as_bytes()).unwrap();
        assert_eq!(titles, vec!["World Series", "Solar eclipse"]);
    }

    #[test]
    fn test_blank_titles_are_skipped() {
        let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>t</title><link>https://example.com</link><description>d</description>
<item><title><![CDATA[  Padded Topic ]]></title></item>
<item><title><![CDATA[   ]]></title></item>
<item><title>Next</title></item>
</channel></rss>"#;

        let titles = parse_titles(feed.as_bytes()).unwrap();
        assert_eq!(titles, vec!["Padded Topic", "Next"]);
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        assert!(matches!(
            parse_titles(b"<html>not a feed"),
            Err(CrawlerError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_topics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/trends/trendingsearches/daily/rss"))
            .and(query_param("geo", "US"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
            .mount(&server)
            .await;

        let trends = GoogleTrends::new(&format!(
            "{}/trends/trendingsearches/daily/rss?geo=US",
            server.uri()
        ));

        assert_eq!(
            trends.fetch_topics().await.unwrap(),
            vec!["World Series", "Solar eclipse"]
        );
    }

    #[tokio::test]
    async fn test_server_error_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let trends = GoogleTrends::new(&server.uri());

        assert!(matches!(trends.fetch_topics().await, Err(CrawlerError::Api(_))));
    }
}
