//! arXiv corpus retrieval settings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use arxivgpt_common::ConfigError;

/// Which arXiv listing to scrape and where to put it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// arXiv category, e.g. `cs.AI`. The archive part selects the OAI set.
    pub category: String,
    /// Records are kept only if they carry one of these categories.
    pub filter_categories: Vec<String>,
    /// Local folder the corpus file set is written to and uploaded from.
    pub folder: String,
    pub oai_base_url: String,
    /// First day of the range (`YYYY-MM-DD`). Defaults to today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// Last day of the range (`YYYY-MM-DD`). Defaults to `date_from`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_until: Option<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            category: "cs.AI".into(),
            filter_categories: vec!["cs.AI".into()],
            folder: "ARXIV".into(),
            oai_base_url: "http://export.arxiv.org/oai2".into(),
            date_from: None,
            date_until: None,
        }
    }
}

impl CorpusConfig {
    /// Resolve the configured date range, filling gaps from `today`.
    pub fn date_range(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), ConfigError> {
        let from = match self.date_from.as_deref() {
            Some(s) => parse_date("corpus.date_from", s)?,
            None => today,
        };
        let until = match self.date_until.as_deref() {
            Some(s) => parse_date("corpus.date_until", s)?,
            None => from,
        };
        if from > until {
            return Err(ConfigError::ValidationError(format!(
                "corpus.date_from ({from}) is after corpus.date_until ({until})"
            )));
        }
        Ok((from, until))
    }
}

pub(crate) fn parse_date(name: &str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        ConfigError::ValidationError(format!("{name} = {value:?} is not a YYYY-MM-DD date: {e}"))
    })
}
