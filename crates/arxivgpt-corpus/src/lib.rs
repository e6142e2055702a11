//! arXiv corpus retrieval.
//!
//! A `CorpusProvider` turns a date range and category into paper records
//! and materializes them as a file set on disk, ready for upload. The
//! production provider is [`ArxivScraper`], which harvests the arXiv
//! OAI-PMH endpoint.

pub mod scraper;
pub mod writer;

use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use scraper::ArxivScraper;
pub use writer::{write_corpus, CORPUS_FILE_NAME};

/// One scraped paper, in the shape written to `arxiv_data.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub doi: String,
    pub created: String,
    pub url: String,
    pub authors: Vec<String>,
}

/// What to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusQuery {
    /// arXiv category such as `cs.AI`.
    pub category: String,
    pub date_from: NaiveDate,
    pub date_until: NaiveDate,
    /// Keep a record only if it lists one of these. Empty keeps everything.
    pub filter_categories: Vec<String>,
}

impl CorpusQuery {
    pub fn new(category: impl Into<String>, date_from: NaiveDate, date_until: NaiveDate) -> Self {
        let category = category.into();
        Self {
            filter_categories: vec![category.clone()],
            category,
            date_from,
            date_until,
        }
    }

    pub fn with_filter_categories(mut self, categories: Vec<String>) -> Self {
        self.filter_categories = categories;
        self
    }

    /// OAI set for the category: the archive part (`cs.AI` -> `cs`).
    pub fn oai_set(&self) -> &str {
        self.category
            .split('.')
            .next()
            .unwrap_or(self.category.as_str())
    }

    /// Whether a record with the given space-separated category list is kept.
    pub fn accepts(&self, record_categories: &str) -> bool {
        if self.filter_categories.is_empty() {
            return true;
        }
        record_categories.split_whitespace().any(|category| {
            self.filter_categories
                .iter()
                .any(|wanted| wanted.eq_ignore_ascii_case(category))
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("network error: {0}")]
    Network(String),
    #[error("arXiv is throttling requests (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("OAI-PMH error {code}: {message}")]
    Oai { code: String, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CorpusError> for arxivgpt_common::ArxivGptError {
    fn from(err: CorpusError) -> Self {
        Self::Corpus(err.to_string())
    }
}

/// Source of paper records.
#[async_trait]
pub trait CorpusProvider: Send + Sync {
    async fn fetch(&self, query: &CorpusQuery) -> Result<Vec<Paper>, CorpusError>;

    /// Write fetched records into `folder` as the file set to upload.
    fn persist(&self, papers: &[Paper], folder: &Path) -> Result<(), CorpusError> {
        write_corpus(folder, papers).map(|_| ())
    }
}
