use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_REDDIT_URL: &str = "https://www.reddit.com/r/popular.json";
pub const DEFAULT_GOOGLE_TRENDS_URL: &str =
    "https://trends.google.com/trends/trendingsearches/daily/rss?geo=US";
pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/top-headlines";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_WIKIPEDIA_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1";

/// Which content generator turns a topic into a post body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Chat-completion model behind an on-disk cache.
    Cached,
    /// Chat-completion model, one call per topic.
    Uncached,
    /// Encyclopedia summary lookup, no model call.
    Wikipedia,
}

impl GeneratorKind {
    pub fn default_max_posts(self) -> usize {
        match self {
            GeneratorKind::Cached => 2,
            GeneratorKind::Uncached | GeneratorKind::Wikipedia => 5,
        }
    }

    /// Model variants refuse to start without both API keys.
    pub fn requires_credentials(self) -> bool {
        matches!(self, GeneratorKind::Cached | GeneratorKind::Uncached)
    }
}

impl FromStr for GeneratorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cached" => Ok(GeneratorKind::Cached),
            "uncached" => Ok(GeneratorKind::Uncached),
            "wikipedia" => Ok(GeneratorKind::Wikipedia),
            other => anyhow::bail!(
                "unknown CONTENT_GENERATOR '{}', expected cached, uncached or wikipedia",
                other
            ),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneratorKind::Cached => "cached",
            GeneratorKind::Uncached => "uncached",
            GeneratorKind::Wikipedia => "wikipedia",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 200,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub reddit_url: String,
    pub google_trends_url: String,
    pub news_api_url: String,
    pub news_api_key: Option<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            reddit_url: DEFAULT_REDDIT_URL.to_string(),
            google_trends_url: DEFAULT_GOOGLE_TRENDS_URL.to_string(),
            news_api_url: DEFAULT_NEWS_API_URL.to_string(),
            news_api_key: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitConfig {
    pub repo_dir: PathBuf,
    pub remote: String,
    pub branch: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            repo_dir: PathBuf::from("."),
            remote: "origin".to_string(),
            branch: "master".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub generator: GeneratorKind,
    pub max_posts: usize,
    pub posts_dir: PathBuf,
    pub cache_path: PathBuf,
    pub wikipedia_base_url: String,
    pub openai: OpenAiConfig,
    pub sources: SourcesConfig,
    pub git: GitConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let generator = match lookup("CONTENT_GENERATOR") {
            Some(value) => value.parse::<GeneratorKind>().context("CONTENT_GENERATOR is invalid")?,
            None => GeneratorKind::Cached,
        };

        let max_posts = lookup("MAX_POSTS")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| generator.default_max_posts());

        let openai_defaults = OpenAiConfig::default();
        let openai = OpenAiConfig {
            api_key: lookup("OPENAI_API_KEY").filter(|s| !s.is_empty()),
            base_url: lookup("OPENAI_BASE_URL").unwrap_or(openai_defaults.base_url),
            model: lookup("OPENAI_MODEL").unwrap_or(openai_defaults.model),
            max_tokens: lookup("OPENAI_MAX_TOKENS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(openai_defaults.max_tokens),
            temperature: lookup("OPENAI_TEMPERATURE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(openai_defaults.temperature),
        };

        let source_defaults = SourcesConfig::default();
        let sources = SourcesConfig {
            reddit_url: lookup("REDDIT_URL").unwrap_or(source_defaults.reddit_url),
            google_trends_url: lookup("GOOGLE_TRENDS_URL")
                .unwrap_or(source_defaults.google_trends_url),
            news_api_url: lookup("NEWS_API_URL").unwrap_or(source_defaults.news_api_url),
            news_api_key: lookup("NEWS_API_KEY").filter(|s| !s.is_empty()),
        };

        let git_defaults = GitConfig::default();
        let git = GitConfig {
            repo_dir: lookup("GIT_REPO_DIR")
                .map(PathBuf::from)
                .unwrap_or(git_defaults.repo_dir),
            remote: lookup("GIT_REMOTE").unwrap_or(git_defaults.remote),
            branch: lookup("GIT_BRANCH").unwrap_or(git_defaults.branch),
        };

        Ok(Config {
            generator,
            max_posts,
            posts_dir: lookup("POSTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("_posts")),
            cache_path: lookup("CACHE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("cache.json")),
            wikipedia_base_url: lookup("WIKIPEDIA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_WIKIPEDIA_BASE_URL.to_string()),
            openai,
            sources,
            git,
        })
    }

    /// Fails when the selected generator needs credentials that are missing.
    /// Runs before any network call.
    pub fn validate(&self) -> Result<()> {
        if self.generator.requires_credentials() {
            self.require_openai_api_key()?;
            self.require_news_api_key()?;
        }
        Ok(())
    }

    pub fn require_openai_api_key(&self) -> Result<&String> {
        self.openai
            .api_key
            .as_ref()
            .context("OpenAI API key not found. Please set the OPENAI_API_KEY environment variable.")
    }

    pub fn require_news_api_key(&self) -> Result<&String> {
        self.sources
            .news_api_key
            .as_ref()
            .context("News API key not found. Please set the NEWS_API_KEY environment variable.")
    }
}
