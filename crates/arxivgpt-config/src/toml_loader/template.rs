//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# arxiv-gpt Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[assistant]
# model = "gpt-3.5-turbo-1106"
# api_base = "https://api.openai.com/v1"
# api_key_env = "OPENAI_API_KEY"
# request_timeout_secs = 120     # 1-600

[corpus]
# category = "cs.AI"
# filter_categories = ["cs.AI"]
# folder = "ARXIV"
# oai_base_url = "http://export.arxiv.org/oai2"
# date_from = "2023-12-16"       # defaults to today
# date_until = "2023-12-16"      # defaults to date_from

[session]
# store_path = "arxiv_sessions.json"
# transcript_dir = "."
# poll_interval_ms = 1000        # 10-60000
# poll_max_attempts = 300        # 0 = poll until the run finishes
# exit_keywords = ["exit", "exit."]

[logging]
# level = "info"                 # trace, debug, info, warn, error
"##
    .to_string()
}
