//! arXiv OAI-PMH harvester.
//!
//! Issues `ListRecords` requests with the `arXiv` metadata prefix for the
//! query's archive set and date range, following resumption tokens until
//! the listing is exhausted.

mod oai;


use async_trait::async_trait;
use tracing::{debug, info};

use crate::{CorpusError, CorpusProvider, CorpusQuery, Paper};

/// Harvests paper records from the arXiv OAI-PMH endpoint.
pub struct ArxivScraper {
    base_url: String,
    http: reqwest::Client,
}

impl ArxivScraper {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CorpusError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| CorpusError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// Fetch one page and return its raw XML.
    async fn fetch_page(&self, params: &[(&str, &str)]) -> Result<String, CorpusError> {
        debug!(url = %self.base_url, ?params, "OAI-PMH request");

        let response = self
            .http
            .get(&self.base_url)
            .query(params)
            .send()
            .await
            .map_err(|e| CorpusError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok());
            return Err(CorpusError::RateLimited { retry_after });
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(CorpusError::Http(format!("HTTP {status}: {text}")));
        }

        response
            .text()
            .await
            .map_err(|e| CorpusError::Network(e.to_string()))
    }
}

#[async_trait]
impl CorpusProvider for ArxivScraper {
    async fn fetch(&self, query: &CorpusQuery) -> Result<Vec<Paper>, CorpusError> {
        let from = query.date_from.format("%Y-%m-%d").to_string();
        let until = query.date_until.format("%Y-%m-%d").to_string();

        let first = [
            ("verb", "ListRecords"),
            ("from", from.as_str()),
            ("until", until.as_str()),
            ("metadataPrefix", "arXiv"),
            ("set", query.oai_set()),
        ];

        let mut papers = Vec::new();
        let mut page = oai::parse_page(&self.fetch_page(&first).await?, query)?;
        let mut pages = 1;

        loop {
            papers.append(&mut page.papers);
            let Some(token) = page.resumption_token.take() else {
                break;
            };
            debug!(%token, pages, "following resumption token");
            let next = [("verb", "ListRecords"), ("resumptionToken", token.as_str())];
            page = oai::parse_page(&self.fetch_page(&next).await?, query)?;
            pages += 1;
        }

        info!(
            category = %query.category,
            from = %from,
            until = %until,
            pages,
            count = papers.len(),
            "arXiv harvest complete"
        );
        Ok(papers)
    }
}
