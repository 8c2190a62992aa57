use std::io::Write;
use thiserror::Error;
use tracing::{info, info_span, Instrument};

use crate::analysis::{self, AnalysisError, CompletionClient};
use crate::config::Config;
use crate::docs::{self, DocError};
use crate::pr::{DiffFetcher, PrError, PrRef};
use crate::report::{self, Report};

/// Any reason a run stops before producing a report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Diff(#[from] PrError),

    #[error(transparent)]
    Docs(#[from] DocError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Fetch the diff, read the docs, ask the model, and write the report to `out`.
///
/// Nothing is written to `out` unless every earlier step succeeded.
pub async fn run<C, W>(
    config: &Config,
    fetcher: &DiffFetcher,
    client: &C,
    out: &mut W,
) -> Result<(), PipelineError>
where
    C: CompletionClient + ?Sized,
    W: Write,
{
    let span = info_span!("doc_check", pr = %config.pr_number, repo = %config.repository);

    async move {
        let pr = PrRef {
            number: config.pr_number.clone(),
            repository: config.repository.clone(),
        };

        info!("fetching pull request diff");
        let diff = fetcher.fetch(&pr).await?;

        info!(path = %config.doc_path.display(), "reading documentation");
        let documentation = docs::read_documentation(&config.doc_path)?;

        let analysis = analysis::analyze(client, &diff, &documentation).await?;
        info!(change_needed = analysis.change_needed(), "analysis complete");

        report::emit(&Report::new(config.pr_number.clone(), analysis), out)?;
        Ok::<(), PipelineError>(())
    }
    .instrument(span)
    .await
}
