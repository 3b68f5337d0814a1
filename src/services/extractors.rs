use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Opening line of an annotated file block: fence at line start, optional
/// language tag, whitespace, `filename=` and the relative path.
static FILE_BLOCK_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^```([A-Za-z0-9_+.-]*)[ \t]+filename=(.+)$")
        .expect("FILE_BLOCK_HEADER is a valid regex pattern")
});

/// A ```json fence with nothing but whitespace before the newline, so
/// `filename=`-annotated blocks never match.
static SUMMARY_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)```").expect("SUMMARY_BLOCK is a valid regex pattern")
});

/// A ```json fence anywhere, tolerant of sanitized (newline-free) input.
static FENCED_JSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("FENCED_JSON is a valid regex pattern")
});

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("empty model response")]
    EmptyInput,

    #[error("malformed JSON in model response: {0}")]
    MalformedJson(String),
}

/// Recovers a JSON value from sanitized model output. Tries the whole string
/// first, then the first ```json fenced region. Pure; callers own logging.
pub fn extract_json(text: &str) -> Result<serde_json::Value, ExtractionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ExtractionError::EmptyInput);
    }

    let direct_err = match serde_json::from_str(trimmed) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    if let Some(captures) = FENCED_JSON.captures(trimmed) {
        let region = captures
            .get(1)
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        return serde_json::from_str(region)
            .map_err(|err| ExtractionError::MalformedJson(err.to_string()));
    }

    Err(ExtractionError::MalformedJson(direct_err.to_string()))
}

/// Pulls the trailing site summary out of raw generator output. The summary
/// is best-effort: a missing or malformed block is simply `None`.
pub fn extract_summary_block(text: &str) -> Option<serde_json::Value> {
    let captures = SUMMARY_BLOCK.captures(text)?;
    let region = captures.get(1)?.as_str().trim();
    serde_json::from_str(region).ok()
}

/// Splits generator output into an ordered relative-path -> content map.
///
/// Fences pair up like brackets inside a block: a tagged fence (```js) opens
/// a nested example, a bare fence closes the innermost open one, and the bare
/// fence at nesting depth zero ends the file. A block with no closing fence
/// before the next annotation or end of input is skipped, as is everything
/// outside annotated blocks (prose, summary fences). Later duplicates of a
/// path overwrite earlier content. Zero matches is a valid outcome and
/// yields an empty map.
pub fn extract_file_blocks(text: &str) -> IndexMap<String, String> {
    let mut files = IndexMap::new();
    let mut path: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();
    let mut depth = 0usize;

    for line in text.lines() {
        if path.is_none() {
            if let Some(captures) = FILE_BLOCK_HEADER.captures(line) {
                path = Some(captures[2].trim().to_string());
                body.clear();
                depth = 0;
            }
            continue;
        }

        if depth == 0 {
            if let Some(captures) = FILE_BLOCK_HEADER.captures(line) {
                // The open block never closed; drop it and start over.
                path = Some(captures[2].trim().to_string());
                body.clear();
                continue;
            }
        }

        if is_bare_fence(line) {
            if depth == 0 {
                if let Some(file_path) = path.take() {
                    files.insert(file_path, body.join("\n").trim().to_string());
                }
                body.clear();
            } else {
                depth -= 1;
                body.push(line);
            }
        } else {
            if is_opening_fence(line) {
                depth += 1;
            }
            body.push(line);
        }
    }
    files
}

fn is_bare_fence(line: &str) -> bool {
    line.trim_end() == "```"
}

fn is_opening_fence(line: &str) -> bool {
    line.starts_with("```") && !is_bare_fence(line)
}
