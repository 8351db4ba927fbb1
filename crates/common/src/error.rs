use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command failed: {0}")]
    Command(String),
}

pub type CrawlerResult<T> = Result<T, CrawlerError>;
