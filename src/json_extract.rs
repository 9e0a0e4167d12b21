/// Cuts the outermost JSON object out of free-form model output.
///
/// Takes everything from the first `{` to the last `}`. When the text has no
/// such pair the whole input is returned so the caller's parse reports the
/// real problem.
pub fn extract_json_object(text: &str) -> &str {
    let start = text.find('{');
    let end = text.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}
