//! Word bank location and the load-once cache in front of it

use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use super::WordBank;
use super::catalog::Catalog;

/// Where the word bank document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordBankSource {
    /// `http(s)://` URL fetched once
    Remote(String),
    /// Local file
    File(PathBuf),
    /// Document text already in memory
    Inline(String),
}

impl WordBankSource {
    /// Interpret a user-supplied location: URLs are remote, anything else a path
    pub fn from_location(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Remote(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    /// Retrieve the raw document text
    pub async fn fetch(&self) -> Result<String> {
        match self {
            Self::Remote(url) => {
                let response = reqwest::get(url)
                    .await
                    .with_context(|| format!("Failed to fetch word bank from {url}"))?
                    .error_for_status()
                    .with_context(|| format!("Word bank request to {url} failed"))?;
                response
                    .text()
                    .await
                    .with_context(|| format!("Failed to read word bank body from {url}"))
            }
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read word bank from {}", path.display())),
            Self::Inline(text) => Ok(text.clone()),
        }
    }
}

impl fmt::Display for WordBankSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline(_) => write!(f, "<inline>"),
        }
    }
}

/// Lazily loaded word bank, fetched at most once per cache
///
/// Concurrent callers of [`WordBankCache::ensure_loaded`] wait on the same
/// fetch. A failed fetch leaves the cache empty so a later call retries.
#[derive(Debug)]
pub struct WordBankCache {
    source: WordBankSource,
    bank: OnceCell<WordBank>,
}

impl WordBankCache {
    pub fn new(source: WordBankSource) -> Self {
        Self {
            source,
            bank: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &WordBankSource {
        &self.source
    }

    /// Loaded bank, if [`WordBankCache::ensure_loaded`] already succeeded
    pub fn get(&self) -> Option<&WordBank> {
        self.bank.get()
    }

    /// Fetch and parse on first use, then hand out the shared bank
    pub async fn ensure_loaded(&self) -> Result<WordBank> {
        let bank = self
            .bank
            .get_or_try_init(|| async {
                let text = self.source.fetch().await?;
                let catalog = Catalog::parse(&text)
                    .with_context(|| format!("Invalid word bank from {}", self.source))?;
                info!(source = %self.source, topics = catalog.topics.len(), "Loaded word bank");
                Ok::<_, anyhow::Error>(WordBank::from_catalog(Arc::new(catalog)))
            })
            .await?;
        Ok(bank.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const YAML: &str = "topics:\n  food:\n    title: Comida\n    words: [pan, manzana]\n";

    #[test]
    fn test_from_location() {
        assert_eq!(
            WordBankSource::from_location("https://example.com/es.yaml"),
            WordBankSource::Remote("https://example.com/es.yaml".to_string())
        );
        assert_eq!(
            WordBankSource::from_location(" http://localhost:8080/bank "),
            WordBankSource::Remote("http://localhost:8080/bank".to_string())
        );
        assert_eq!(
            WordBankSource::from_location("./words/es.yaml"),
            WordBankSource::File(PathBuf::from("./words/es.yaml"))
        );
    }

    #[tokio::test]
    async fn test_inline_source_loads() {
        let cache = WordBankCache::new(WordBankSource::Inline(YAML.to_string()));
        assert!(cache.get().is_none());

        let bank = cache.ensure_loaded().await.unwrap();
        assert_eq!(bank.words_for_topic("food"), ["pan", "manzana"]);
        assert!(cache.get().is_some());
    }

    #[tokio::test]
    async fn test_second_load_returns_same_bank() {
        let cache = WordBankCache::new(WordBankSource::Inline(YAML.to_string()));
        let first = cache.ensure_loaded().await.unwrap();
        let second = cache.ensure_loaded().await.unwrap();
        assert!(first.shares_catalog_with(&second));
    }

    #[tokio::test]
    async fn test_file_source_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bank.yaml");
        std::fs::write(&path, YAML).unwrap();

        let cache = WordBankCache::new(WordBankSource::File(path));
        let bank = cache.ensure_loaded().await.unwrap();
        assert_eq!(bank.topics().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let cache = WordBankCache::new(WordBankSource::File(dir.path().join("missing.yaml")));
        assert!(cache.ensure_loaded().await.is_err());
        assert!(cache.get().is_none());
    }

    #[tokio::test]
    async fn test_malformed_document_is_an_error() {
        let cache = WordBankCache::new(WordBankSource::Inline("topics: [1, 2".to_string()));
        let err = cache.ensure_loaded().await.unwrap_err();
        assert!(format!("{err:#}").contains("Invalid word bank"));
    }
}
