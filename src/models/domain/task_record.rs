use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const TASK_STATUS_SUCCESS: &str = "success";
pub const TASK_STATUS_FALLBACK: &str = "fallback";

/// Everything one site-generation run produced. `file_map` keeps the
/// relative-path ordering the blocks were emitted in; `raw_response` is kept
/// for diagnostics only.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TaskRecord {
    pub task_id: String,
    pub status: String,
    pub message: String,
    pub files: Vec<String>,
    pub file_map: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SiteMetadata>,
    pub raw_response: String,
    pub created_at: DateTime<Utc>,
}

impl TaskRecord {
    pub fn new(
        task_id: String,
        status: &str,
        message: String,
        file_map: IndexMap<String, String>,
        metadata: Option<SiteMetadata>,
        raw_response: String,
    ) -> Self {
        Self {
            task_id,
            status: status.to_string(),
            message,
            files: file_map.keys().cloned().collect(),
            file_map,
            metadata,
            raw_response,
            created_at: Utc::now(),
        }
    }

    /// The page preview serves by default: `public/index.html` when present,
    /// otherwise the first HTML file in emission order.
    pub fn index_page(&self) -> Option<&str> {
        if let Some(content) = self.file_map.get("public/index.html") {
            return Some(content.as_str());
        }
        self.file_map
            .iter()
            .find(|(path, _)| path.ends_with(".html"))
            .map(|(_, content)| content.as_str())
    }
}

/// Trailing summary the site generator is asked to emit after its file
/// blocks. Every field is optional; a missing or malformed summary never
/// fails the run.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteMetadata {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub technology_used: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TaskSummary {
    pub task_id: String,
    pub status: String,
    pub files: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&TaskRecord> for TaskSummary {
    fn from(record: &TaskRecord) -> Self {
        Self {
            task_id: record.task_id.clone(),
            status: record.status.clone(),
            files: record.files.clone(),
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_files(files: &[(&str, &str)]) -> TaskRecord {
        let mut map = IndexMap::new();
        for (path, content) in files {
            map.insert(path.to_string(), content.to_string());
        }
        TaskRecord::new(
            "task-1".into(),
            TASK_STATUS_SUCCESS,
            "done".into(),
            map,
            None,
            String::new(),
        )
    }

    #[test]
    fn test_files_follow_map_order() {
        let record = record_with_files(&[("b.css", "b"), ("a.html", "a")]);
        assert_eq!(record.files, vec!["b.css", "a.html"]);
    }

    #[test]
    fn test_index_page_prefers_public_index() {
        let record = record_with_files(&[
            ("other.html", "<p>other</p>"),
            ("public/index.html", "<p>index</p>"),
        ]);
        assert_eq!(record.index_page(), Some("<p>index</p>"));
    }

    #[test]
    fn test_index_page_falls_back_to_first_html() {
        let record = record_with_files(&[("style.css", "css"), ("page.html", "<p>page</p>")]);
        assert_eq!(record.index_page(), Some("<p>page</p>"));
    }

    #[test]
    fn test_index_page_absent_without_html() {
        let record = record_with_files(&[("style.css", "css")]);
        assert_eq!(record.index_page(), None);
    }
}
