use std::path::PathBuf;

use clap::Parser;

/// arxiv-gpt: chat with an assistant about today's arXiv papers.
#[derive(Parser, Debug)]
#[command(name = "arxivgpt", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error, or a filter directive).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
