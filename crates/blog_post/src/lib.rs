use std::path::{Path, PathBuf};

use common::{Config, CrawlerError, CrawlerResult};
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};
use tracing::{debug, info};

/// Characters that are stripped from titles before they become file names.
pub const UNSAFE_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];
pub const MAX_SLUG_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub title: String,
    pub body: String,
}

impl BlogPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

pub fn slugify(title: &str) -> String {
    title
        .chars()
        .filter(|c| !UNSAFE_CHARS.contains(c))
        .map(|c| if c == ' ' { '-' } else { c })
        .collect::<String>()
        .to_lowercase()
        .chars()
        .take(MAX_SLUG_LEN)
        .collect()
}

/// `<posts_dir>/<YYYY-MM-DD>-<slug>.md`
pub fn post_path(posts_dir: &Path, title: &str, date: Date) -> PathBuf {
    posts_dir.join(format!("{}-{}.md", date, slugify(title)))
}

pub fn render(post: &BlogPost, timestamp: OffsetDateTime) -> CrawlerResult<String> {
    let timestamp = timestamp
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .map_err(|e| CrawlerError::Parse(format!("failed to format post date: {}", e)))?;

    // Quoted YAML scalar.
    let title_yaml = post.title.replace('\\', "\\\\").replace('"', "\\\"");

    Ok(format!(
        "---\nlayout: post\ntitle: \"{}\"\ndate: {}\ncategories: trending\n---\n\n# {}\n\n{}\n",
        title_yaml, timestamp, post.title, post.body
    ))
}

/// The local UTC offset, or UTC when it cannot be determined.
///
/// Call before the runtime starts extra threads; afterwards the lookup is
/// refused on most Unix targets.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or_else(|e| {
        debug!("Local offset unavailable ({}), using UTC", e);
        UtcOffset::UTC
    })
}

pub struct PostWriter {
    posts_dir: PathBuf,
}

impl PostWriter {
    pub fn new(posts_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.posts_dir)
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Overwrites any post already at the same path.
    pub async fn write(&self, post: &BlogPost, now: OffsetDateTime) -> CrawlerResult<PathBuf> {
        let path = post_path(&self.posts_dir, &post.title, now.date());
        let content = render(post, now)?;

        tokio::fs::create_dir_all(&self.posts_dir).await?;
        tokio::fs::write(&path, content).await?;

        info!("Blog post created: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What? Why: \"Now\" <or> never|ever*"), "what-why-now-or-neverever");
        assert_eq!(slugify("AC/DC \\ Tour"), "acdc--tour");
    }

    #[test]
    fn test_slugify_only_unsafe_is_empty() {
        assert_eq!(slugify("?*:|"), "");
    }

    #[test]
    fn test_slug_properties_hold_for_many_titles() {
        let titles = [
            "A very long headline about the state of the economy and what it means for you",
            "  leading and trailing  ",
            "ÜBER Große Straße / Ärger?",
            "Tab\tseparated: \"quoted\"",
            "日本語 のタイトル <テスト>",
            "",
        ];

        for title in titles {
            let slug = slugify(title);
            assert!(slug.chars().count() <= MAX_SLUG_LEN, "{slug}");
            assert!(!slug.contains(' '), "{slug}");
            assert!(!slug.chars().any(|c| UNSAFE_CHARS.contains(&c)), "{slug}");
            assert_eq!(slug, slug.to_lowercase());
        }
    }

    #[test]
    fn test_slug_truncates_on_characters() {
        let title = "é".repeat(60);
        assert_eq!(slugify(&title).chars().count(), 50);
    }

    #[test]
    fn test_post_path_is_deterministic() {
        let date = datetime!(2024-03-09 23:59:59 UTC).date();
        let dir = Path::new("_posts");

        let first = post_path(dir, "Breaking: Markets Rally", date);
        let second = post_path(dir, "Breaking: Markets Rally", date);

        assert_eq!(first, second);
        assert_eq!(first, PathBuf::from("_posts/2024-03-09-breaking-markets-rally.md"));
    }

    #[test]
    fn test_render_front_matter() {
        let post = BlogPost::new("Solar Eclipse", "The Moon covers the Sun.");
        let rendered = render(&post, datetime!(2024-04-08 14:05:09 UTC)).unwrap();

        assert_eq!(
            rendered,
            "---\nlayout: post\ntitle: \"Solar Eclipse\"\ndate: 2024-04-08 14:05:09\ncategories: trending\n---\n\n# Solar Eclipse\n\nThe Moon covers the Sun.\n"
        );
    }

    #[test]
    fn test_render_escapes_quotes_in_front_matter_only() {
        let post = BlogPost::new("She said \"no\"", "body");
        let rendered = render(&post, datetime!(2024-01-01 00:00:00 UTC)).unwrap();

        assert!(rendered.contains("title: \"She said \\\"no\\\"\"\n"));
        assert!(rendered.contains("# She said \"no\"\n"));
    }

    #[tokio::test]
    async fn test_write_creates_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PostWriter::new(dir.path().join("_posts"));
        let now = datetime!(2024-05-01 08:00:00 UTC);

        let path = writer.write(&BlogPost::new("Same Title", "first"), now).await.unwrap();
        let again = writer.write(&BlogPost::new("same title", "second"), now).await.unwrap();

        assert_eq!(path, again);
        assert_eq!(path, dir.path().join("_posts/2024-05-01-same-title.md"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("# same title\n\nsecond\n"));
    }
}
