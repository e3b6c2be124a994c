/// Locates the JSON object in free-form evaluator output.
///
/// Takes everything from the first `{` through the last `}` inclusive. This is
/// a heuristic, not a parser: braces inside surrounding prose will widen the
/// slice. Returns `None` when either brace is missing. When the last `}` comes
/// before the first `{` the slice is empty and will fail to parse downstream.
pub fn extract_json_object(output: &str) -> Option<&str> {
    let start = output.find('{')?;
    let end = output.rfind('}')?;
    if end < start {
        return Some("");
    }
    Some(&output[start..=end])
}
