use crate::schema::ArxivGptConfig;

use super::helpers::{validate_non_empty, validate_range};

pub(crate) fn validate_session(errors: &mut Vec<String>, config: &ArxivGptConfig) {
    let session = &config.session;
    validate_non_empty(errors, "session.store_path", &session.store_path);
    validate_non_empty(errors, "session.transcript_dir", &session.transcript_dir);
    validate_range(
        errors,
        "session.poll_interval_ms",
        session.poll_interval_ms,
        10,
        60_000,
    );

    if session.exit_keywords.is_empty() {
        errors.push("session.exit_keywords must contain at least one keyword".into());
    }
    for keyword in &session.exit_keywords {
        validate_non_empty(errors, "session.exit_keywords entry", keyword);
    }
}
