//! OAI-PMH `ListRecords` response types for the `arXiv` metadata format.

use serde::Deserialize;

use crate::{CorpusError, CorpusQuery, Paper};

const ABS_URL: &str = "https://arxiv.org/abs/";

#[derive(Debug, Deserialize)]
pub(crate) struct OaiResponse {
    #[serde(rename = "ListRecords", default)]
    pub list_records: Option<ListRecords>,
    #[serde(default)]
    pub error: Option<OaiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OaiError {
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(rename = "$text", default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListRecords {
    #[serde(rename = "record", default)]
    pub records: Vec<OaiRecord>,
    #[serde(rename = "resumptionToken", default)]
    pub resumption_token: Option<ResumptionToken>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResumptionToken {
    #[serde(rename = "$text", default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OaiRecord {
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Metadata {
    #[serde(rename = "arXiv")]
    pub arxiv: ArxivMetadata,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArxivMetadata {
    pub id: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub authors: Authors,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub categories: String,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Authors {
    #[serde(default)]
    pub author: Vec<Author>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Author {
    pub keyname: String,
    #[serde(default)]
    pub forenames: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
}

impl Author {
    fn full_name(&self) -> String {
        [
            self.forenames.as_deref(),
            Some(self.keyname.as_str()),
            self.suffix.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// One page of a harvest.
#[derive(Debug, Default)]
pub(crate) struct Page {
    pub papers: Vec<Paper>,
    pub resumption_token: Option<String>,
}

pub(crate) fn parse_page(xml: &str, query: &CorpusQuery) -> Result<Page, CorpusError> {
    let response: OaiResponse =
        quick_xml::de::from_str(xml).map_err(|e| CorpusError::Parse(e.to_string()))?;

    if let Some(error) = response.error {
        // An empty harvest is reported as an OAI error, not an empty list.
        if error.code == "noRecordsMatch" {
            return Ok(Page::default());
        }
        return Err(CorpusError::Oai {
            code: error.code,
            message: normalize_whitespace(&error.message),
        });
    }

    let list = response.list_records.ok_or_else(|| {
        CorpusError::Parse("response has neither ListRecords nor error".into())
    })?;
    let papers = list
        .records
        .into_iter()
        .filter_map(|record| record.metadata)
        .map(|metadata| metadata.arxiv)
        .filter(|arxiv| query.accepts(&arxiv.categories))
        .map(into_paper)
        .collect();

    let resumption_token = list
        .resumption_token
        .and_then(|token| token.value)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    Ok(Page {
        papers,
        resumption_token,
    })
}

fn into_paper(arxiv: ArxivMetadata) -> Paper {
    let id = arxiv.id.trim().to_string();
    Paper {
        url: format!("{ABS_URL}{id}"),
        title: normalize_whitespace(&arxiv.title),
        abstract_text: normalize_whitespace(&arxiv.abstract_text),
        doi: arxiv.doi.map(|d| d.trim().to_string()).unwrap_or_default(),
        created: arxiv.created.map(|c| c.trim().to_string()).unwrap_or_default(),
        authors: arxiv.authors.author.iter().map(Author::full_name).collect(),
        id,
    }
}

/// Collapse newlines and runs of whitespace into single spaces.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
