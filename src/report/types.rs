use crate::analysis::DocAnalysis;

/// Everything the rendered proposal needs.
#[derive(Debug, Clone)]
pub struct Report {
    /// Pull request identifier, as given in the environment
    pub pr_number: String,
    /// Model verdict, possibly with missing fields
    pub analysis: DocAnalysis,
}

impl Report {
    pub fn new(pr_number: impl Into<String>, analysis: DocAnalysis) -> Self {
        Self {
            pr_number: pr_number.into(),
            analysis,
        }
    }
}
