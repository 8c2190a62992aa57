mod analysis;
mod config;
mod docs;
mod pipeline;
mod pr;
mod report;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// doc-drift: asks Gemini whether a pull request leaves an AsciiDoc
/// document stale, and prints a proposed update for a CI job to capture.
#[derive(Parser, Debug)]
#[command(
    name = "doc-drift",
    version,
    about,
    after_help = "Environment:\n  \
        GEMINI_API_KEY     Gemini API key\n  \
        PR_NUMBER          Pull request to analyze\n  \
        GITHUB_REPOSITORY  Repository in owner/name form\n  \
        DOC_FILE_PATH      AsciiDoc file to validate\n\n\
        The report is printed between ISSUE_BODY<<EOF and EOF lines."
)]
struct Cli {}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let _cli = Cli::parse();

    // Failures are logged only; the exit status stays 0 either way.
    if let Err(e) = run().await {
        log_failure(e.as_ref());
    }
}

fn log_failure(err: &dyn std::error::Error) {
    error!(error = %err, "documentation check aborted, no report produced");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("loading configuration");
    let config = config::Config::from_env()?;

    let fetcher = pr::DiffFetcher::default();
    let client = analysis::GeminiClient::new(config.api_key.clone());

    let stdout = std::io::stdout();
    pipeline::run(&config, &fetcher, &client, &mut stdout.lock()).await?;
    info!("done");
    Ok(())
}
