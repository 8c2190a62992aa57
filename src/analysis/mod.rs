pub mod gemini;
pub mod prompt;
pub mod types;

pub use gemini::GeminiClient;
pub use types::DocAnalysis;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("request to generative model failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("generative model returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("generative model returned no text{}", reason_suffix(.reason))]
    EmptyResponse { reason: Option<String> },

    #[error("failed to decode analysis JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(" ({r})")).unwrap_or_default()
}

/// A remote model that answers a prompt with a JSON document.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model name, for logging
    fn name(&self) -> &str;

    /// Send the prompt once and return the raw response text.
    async fn generate_json(&self, prompt: &str) -> Result<String, AnalysisError>;
}

/// Ask the model whether `docs` is stale relative to `diff`.
///
/// One request, no retry. A response that is not a JSON object is reported
/// as `AnalysisError::Decode`; wrong-typed fields are tolerated.
pub async fn analyze<C>(client: &C, diff: &str, docs: &str) -> Result<DocAnalysis, AnalysisError>
where
    C: CompletionClient + ?Sized,
{
    let prompt = prompt::build_prompt(diff, docs);

    info!(model = client.name(), "sending request to generative model");
    let raw = client.generate_json(&prompt).await?;
    info!(model = client.name(), "received response from generative model");

    let analysis = DocAnalysis::from_json(&raw)?;
    Ok(analysis)
}
