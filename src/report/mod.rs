pub mod types;

pub use types::Report;

use std::io::{self, Write};
use tracing::{instrument, warn};

/// Opening line of the block captured by the CI job.
pub const OPEN_SENTINEL: &str = "ISSUE_BODY<<EOF";
/// Closing line of the captured block.
pub const CLOSE_SENTINEL: &str = "EOF";

const NO_COMPONENTS: &str = "None identified";
const NO_REASONING: &str = "No reasoning provided.";
const NO_PROPOSAL: &str = "No changes proposed.";

/// Render the report as Markdown: heading, verdict, affected components,
/// block-quoted reasoning and the proposal in an `asciidoc` code block.
/// Missing analysis fields are replaced by placeholder text.
pub fn render(report: &Report) -> String {
    let analysis = &report.analysis;

    let components = analysis
        .affected_components
        .as_ref()
        .map(|c| c.join(", "))
        .unwrap_or_else(|| NO_COMPONENTS.to_string());
    let reasoning = analysis.reasoning.as_deref().unwrap_or(NO_REASONING);
    let proposal = analysis.proposed_ascii_changes.as_deref().unwrap_or(NO_PROPOSAL);
    let fence = fence_for(proposal);

    let mut md = String::new();
    md.push_str(&format!(
        "## AI-Generated Documentation Proposal for PR #{}\n\n",
        report.pr_number
    ));
    md.push_str(&format!(
        "**Doc Change Needed:** {}\n\n",
        if analysis.change_needed() { "Yes" } else { "No" }
    ));
    md.push_str(&format!("**Affected Components:**\n{}\n\n", components));
    md.push_str(&format!("**Reasoning:**\n{}\n\n", block_quote(reasoning)));
    md.push_str("**Proposed AsciiDoc Changes:**\n");
    md.push_str(&format!("{fence}asciidoc\n{}\n{fence}\n", proposal.trim_end_matches('\n')));
    md
}

/// Write the rendered report between the capture sentinels.
#[instrument(skip(report, out), fields(pr = %report.pr_number))]
pub fn emit<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    let body = render(report);
    if body.lines().any(|line| line == CLOSE_SENTINEL) {
        warn!("report body contains a bare {CLOSE_SENTINEL} line; CI capture will be truncated");
    }

    writeln!(out, "{OPEN_SENTINEL}")?;
    write!(out, "{body}")?;
    writeln!(out, "{CLOSE_SENTINEL}")?;
    out.flush()
}

/// Prefix every line with `> ` so multi-line text stays inside the quote.
fn block_quote(text: &str) -> String {
    if text.trim().is_empty() {
        return ">".to_string();
    }
    text.lines()
        .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A backtick fence longer than any backtick run inside `content`.
fn fence_for(content: &str) -> String {
    let longest = content
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}
