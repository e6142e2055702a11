//! Corpus section: category syntax, folder, and date range.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::{parse_date, ArxivGptConfig};

use super::helpers::{validate_http_url, validate_non_empty};

/// arXiv category: archive with optional subject class (`cs.AI`, `hep-th`).
static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z-]*(\.[A-Za-z][A-Za-z-]*)?$").unwrap());

pub(crate) fn validate_corpus(errors: &mut Vec<String>, config: &ArxivGptConfig) {
    let corpus = &config.corpus;

    if !CATEGORY_RE.is_match(&corpus.category) {
        errors.push(format!(
            "corpus.category = {:?} is not an arXiv category",
            corpus.category
        ));
    }
    for category in &corpus.filter_categories {
        if !CATEGORY_RE.is_match(category) {
            errors.push(format!(
                "corpus.filter_categories entry {category:?} is not an arXiv category"
            ));
        }
    }

    validate_non_empty(errors, "corpus.folder", &corpus.folder);
    validate_http_url(errors, "corpus.oai_base_url", &corpus.oai_base_url);

    let from = corpus
        .date_from
        .as_deref()
        .map(|s| parse_date("corpus.date_from", s));
    let until = corpus
        .date_until
        .as_deref()
        .map(|s| parse_date("corpus.date_until", s));

    match (from, until) {
        (Some(Ok(from)), Some(Ok(until))) if from > until => {
            errors.push(format!(
                "corpus.date_from ({from}) is after corpus.date_until ({until})"
            ));
        }
        (from, until) => {
            for result in [from, until].into_iter().flatten() {
                if let Err(e) = result {
                    errors.push(e.to_string());
                }
            }
        }
    }
}
