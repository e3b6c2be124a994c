//! The fixed grading rubric sent to the evaluator.
//!
//! [`render`] embeds the document type and a bounded prefix of the document
//! into [`TEMPLATE`]. Rendering is pure; nothing here touches the filesystem.

/// Default upper bound on how much of a document reaches the evaluator.
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 15_000;

const TEMPLATE: &str = "\
You are a Principal Engineer and strict Auditor.
Grade this {doc_type} on a scale of 0-100.

RUBRIC:
- 90-100: Perfect. Unambiguous, technically rigorous, edge cases covered.
- 80-89: Good. Actionable, but minor gaps.
- <80: Fail. Vague, incomplete, or lacks technical depth.

DOCUMENT CONTENT:
{content}

OUTPUT:
Return ONLY raw JSON in this format:
{
    \"score\": <int>,
    \"reasoning\": \"<concise explanation of why it passed or failed>\",
    \"gaps\": [\"<specific gap 1>\", \"<specific gap 2>\"]
}
";

/// Returns the first `max_chars` characters of `content`.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
pub fn truncate_chars(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

/// Renders the rubric prompt for one document.
pub fn render(doc_type: &str, content: &str, max_chars: usize) -> String {
    let content = truncate_chars(content, max_chars);
    // Single pass so a document containing `{doc_type}` is left alone.
    let (head, tail) = TEMPLATE
        .split_once("{content}")
        .unwrap_or((TEMPLATE, ""));
    let mut prompt = head.replace("{doc_type}", doc_type);
    prompt.push_str(content);
    prompt.push_str(tail);
    prompt
}
