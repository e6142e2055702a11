//! Wiring the configured collaborators into an `AppContext`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use arxivgpt_ai::{OpenAiClient, OpenAiConfig};
use arxivgpt_common::ArxivGptError;
use arxivgpt_config::ArxivGptConfig;
use arxivgpt_corpus::{ArxivScraper, CorpusQuery};
use arxivgpt_session::{AppContext, PollPolicy, SessionSettings, SessionStore, TokioSleeper};

/// Load `.env` from the working directory without overriding set variables.
pub fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }
}

fn parse_dotenv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim();
            let key = key.strip_prefix("export ").unwrap_or(key).trim();
            (key, value.trim().trim_matches('"').trim_matches('\''))
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

pub fn session_settings(config: &ArxivGptConfig) -> SessionSettings {
    SessionSettings {
        model: config.assistant.model.clone(),
        corpus_folder: PathBuf::from(&config.corpus.folder),
        transcript_dir: PathBuf::from(&config.session.transcript_dir),
        poll: PollPolicy {
            interval: config.session.poll_interval(),
            max_attempts: config.session.max_poll_attempts(),
        },
        exit_keywords: config.session.exit_keywords.clone(),
    }
}

/// The scrape requested by the config, with missing dates taken from `today`.
pub fn corpus_query(config: &ArxivGptConfig, today: NaiveDate) -> Result<CorpusQuery, ArxivGptError> {
    let (from, until) = config.corpus.date_range(today)?;
    Ok(CorpusQuery::new(config.corpus.category.as_str(), from, until)
        .with_filter_categories(config.corpus.filter_categories.clone()))
}

pub fn build_context(config: &ArxivGptConfig) -> Result<AppContext, ArxivGptError> {
    let mut openai = OpenAiConfig::from_env(&config.assistant.api_key_env)?.with_request_timeout(
        Duration::from_secs(u64::from(config.assistant.request_timeout_secs)),
    );
    if std::env::var("OPENAI_BASE_URL").is_err() {
        openai = openai.with_api_base(config.assistant.api_base.as_str());
    }
    tracing::debug!(?openai, "OpenAI client configured");

    let client = Arc::new(OpenAiClient::new(openai)?);
    let scraper = ArxivScraper::new(config.corpus.oai_base_url.as_str())?;

    Ok(AppContext {
        corpus: Arc::new(scraper),
        registry: client.clone(),
        documents: client,
        sleeper: Arc::new(TokioSleeper),
        store: SessionStore::new(&config.session.store_path),
        settings: session_settings(config),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotenv_lines() {
        let parsed = parse_dotenv(
            "# comment\n\nOPENAI_API_KEY=\"sk-abc\"\nexport OPENAI_BASE_URL = http://x/v1\nnot a pair\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("OPENAI_API_KEY", "sk-abc"),
                ("OPENAI_BASE_URL", "http://x/v1"),
            ]
        );
    }

    #[test]
    fn settings_follow_config() {
        let mut config = ArxivGptConfig::default();
        config.session.poll_max_attempts = 0;
        config.session.poll_interval_ms = 250;
        config.corpus.folder = "papers".into();

        let settings = session_settings(&config);
        assert_eq!(settings.poll.max_attempts, None);
        assert_eq!(settings.poll.interval, Duration::from_millis(250));
        assert_eq!(settings.corpus_folder, PathBuf::from("papers"));
        assert_eq!(settings.model, "gpt-3.5-turbo-1106");
        assert_eq!(settings.exit_keywords, vec!["exit", "exit."]);
    }

    #[test]
    fn query_defaults_to_today() {
        let config = ArxivGptConfig::default();
        let today = NaiveDate::from_ymd_opt(2023, 12, 16).unwrap();
        let query = corpus_query(&config, today).unwrap();
        assert_eq!(query.category, "cs.AI");
        assert_eq!(query.date_from, today);
        assert_eq!(query.date_until, today);
        assert_eq!(query.filter_categories, vec!["cs.AI"]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut config = ArxivGptConfig::default();
        config.corpus.date_from = Some("2023-12-17".into());
        config.corpus.date_until = Some("2023-12-16".into());
        let today = NaiveDate::from_ymd_opt(2023, 12, 16).unwrap();
        assert!(corpus_query(&config, today).is_err());
    }
}
