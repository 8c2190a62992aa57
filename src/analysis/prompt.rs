const INSTRUCTIONS: &str = r#"You are a senior software architect. Your task is to validate a code change against the provided AsciiDoc documentation.

1. Analyze the CODE DIFF to understand what has changed.
2. Analyze the RELEVANT_DOCUMENTATION_CONTEXT to understand the current state of the documentation.
3. Compare the two. Determine if the documentation is now outdated, inconsistent, or incomplete due to the code changes.

You must respond ONLY with a valid JSON object. Do not include any other text or explanations.
The JSON object must contain the following keys:
- "is_doc_change_needed": boolean (true if a change is required)
- "affected_components": an array of strings (e.g., ["auth-service", "user-profile"])
- "reasoning": a string (explain *why* a change is or is not needed)
- "proposed_ascii_changes": a string (provide a clear, structured proposal for the new or updated documentation section in AsciiDoc format)
"#;

pub const DIFF_MARKER: &str = "**CODE DIFF:**";
pub const DOCS_MARKER: &str = "**RELEVANT_DOCUMENTATION_CONTEXT:**";

/// Build the review prompt. Both inputs are embedded verbatim.
pub fn build_prompt(diff: &str, docs: &str) -> String {
    format!("{INSTRUCTIONS}\n{DIFF_MARKER}\n{diff}\n\n{DOCS_MARKER}\n{docs}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = r#"diff --git a/src/auth.rs b/src/auth.rs
--- a/src/auth.rs
+++ b/src/auth.rs
@@ -1,3 +1,3 @@
-const TOKEN_TTL_MINUTES: u64 = 60;
+const TOKEN_TTL_MINUTES: u64 = 15;
"#;

    const DOCS: &str = "= Auth Service\n\nTokens expire after one hour.\n";

    #[test]
    fn test_prompt_contains_instructions() {
        let prompt = build_prompt(DIFF, DOCS);
        assert!(prompt.starts_with("You are a senior software architect."));
        assert!(prompt.contains("respond ONLY with a valid JSON object"));
        for key in [
            "\"is_doc_change_needed\"",
            "\"affected_components\"",
            "\"reasoning\"",
            "\"proposed_ascii_changes\"",
        ] {
            assert!(prompt.contains(key), "prompt missing {key}");
        }
    }

    #[test]
    fn test_inputs_recoverable_from_prompt() {
        let prompt = build_prompt(DIFF, DOCS);

        let (_, rest) = prompt.split_once(&format!("{DIFF_MARKER}\n")).unwrap();
        let (diff, rest) = rest.split_once(&format!("\n\n{DOCS_MARKER}\n")).unwrap();
        let docs = rest.strip_suffix('\n').unwrap();

        assert_eq!(diff, DIFF);
        assert_eq!(docs, DOCS);
    }

    #[test]
    fn test_diff_precedes_docs() {
        let prompt = build_prompt("DIFF-BODY", "DOCS-BODY");
        let diff_at = prompt.find("DIFF-BODY").unwrap();
        let docs_at = prompt.find("DOCS-BODY").unwrap();
        assert!(prompt.find(DIFF_MARKER).unwrap() < diff_at);
        assert!(diff_at < prompt.find(DOCS_MARKER).unwrap());
        assert!(prompt.find(DOCS_MARKER).unwrap() < docs_at);
    }
}
