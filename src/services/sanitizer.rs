/// Cleans raw model output ahead of strict JSON parsing.
///
/// Removes every ASCII control character (0x00-0x1F and DEL), trims
/// surrounding whitespace, and strips a leading ```json opening marker plus a
/// bare trailing fence. Stripping repeats until a fixed point so the function
/// is idempotent even when markers stack.
pub fn sanitize(raw: &str) -> String {
    let without_controls: String = raw.chars().filter(|c| !c.is_ascii_control()).collect();

    let mut text = without_controls.trim();
    loop {
        let mut candidate = text;
        if let Some(rest) = candidate.strip_prefix("```json") {
            candidate = rest;
        }
        if let Some(rest) = candidate.strip_suffix("```") {
            candidate = rest;
        }
        let candidate = candidate.trim();
        if candidate == text {
            break;
        }
        text = candidate;
    }
    text.to_string()
}
