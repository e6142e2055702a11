use crate::schema::ArxivGptConfig;

use super::helpers::{validate_http_url, validate_non_empty, validate_range};

pub(crate) fn validate_assistant(errors: &mut Vec<String>, config: &ArxivGptConfig) {
    let assistant = &config.assistant;
    validate_non_empty(errors, "assistant.model", &assistant.model);
    validate_non_empty(errors, "assistant.api_key_env", &assistant.api_key_env);
    validate_http_url(errors, "assistant.api_base", &assistant.api_base);
    validate_range(
        errors,
        "assistant.request_timeout_secs",
        assistant.request_timeout_secs,
        1,
        600,
    );
}
