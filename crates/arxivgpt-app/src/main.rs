mod boot;
mod cli;
mod menu;

use tracing_subscriber::EnvFilter;

use arxivgpt_common::ArxivGptError;
use arxivgpt_config::ArxivGptConfig;
use arxivgpt_session::SessionController;

fn init_logging(directive: &str) {
    let mut filter = EnvFilter::from_default_env();
    for d in [directive, "hyper=warn", "reqwest=warn"] {
        match d.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring log directive {d:?}: {e}"),
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(config: &ArxivGptConfig) -> Result<(), ArxivGptError> {
    let ctx = boot::build_context(config)?;
    let query = boot::corpus_query(config, chrono::Local::now().date_naive())?;
    let controller = SessionController::new(&ctx);

    let stdin = std::io::stdin();
    let summary = menu::run(&controller, &query, stdin.lock(), std::io::stdout()).await?;
    if let Some(summary) = summary {
        tracing::info!(
            turns = summary.outcomes.len(),
            transcript = ?summary.transcript,
            "Session closed"
        );
    }
    Ok(())
}

fn main() {
    boot::load_dotenv();

    let args = cli::parse();

    let (config, config_error) = match arxivgpt_config::load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (ArxivGptConfig::default(), Some(e)),
    };

    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.as_directive().to_string());
    init_logging(&directive);

    tracing::info!("arxivgpt v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    tracing::debug!("Effective config: {}", arxivgpt_config::config_to_json(&config));

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return;
        }
    };

    if let Err(e) = runtime.block_on(run(&config)) {
        tracing::error!("{e}");
        eprintln!("arxivgpt: {e}");
    }
    tracing::info!("Shutdown complete");
}
