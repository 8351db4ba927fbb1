use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use common::{CrawlerError, CrawlerResult};
use tracing::debug;

pub type CachedContent = BTreeMap<String, String>;

/// Topic -> generated body, stored as one flat JSON object.
///
/// The file is read whole on every lookup and rewritten whole on every store.
/// Entries are never evicted and concurrent writers are not coordinated.
#[derive(Debug, Clone)]
pub struct ContentCache {
    path: PathBuf,
}

impl ContentCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty cache.
    pub async fn load(&self) -> CrawlerResult<CachedContent> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CachedContent::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw).map_err(|e| {
            CrawlerError::Parse(format!("cache file {} is not valid: {}", self.path.display(), e))
        })
    }

    pub async fn save(&self, entries: &CachedContent) -> CrawlerResult<()> {
        let raw = serde_json::to_string(entries)
            .map_err(|e| CrawlerError::Parse(format!("failed to encode cache: {}", e)))?;
        tokio::fs::write(&self.path, raw).await?;
        debug!("Saved {} cache entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ContentCache::new(dir.path().join("cache.json"));

        assert!(cache.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ContentCache::new(dir.path().join("cache.json"));

        let mut entries = CachedContent::new();
        entries.insert("Rust".to_string(), "Rust is fast.".to_string());
        cache.save(&entries).await.unwrap();

        entries.insert("Go".to_string(), "Go is simple.".to_string());
        cache.save(&entries).await.unwrap();

        let loaded = cache.load().await.unwrap();
        assert_eq!(loaded, entries);

        let raw = std::fs::read_to_string(cache.path()).unwrap();
        assert_eq!(raw, r#"{"Go":"Go is simple.","Rust":"Rust is fast."}"#);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = ContentCache::new(path).load().await.unwrap_err();
        assert!(matches!(err, CrawlerError::Parse(_)));
    }
}
