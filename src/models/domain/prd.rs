use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Saved requirements document, one JSON file per id. The content is opaque
/// free text; nothing downstream parses its structure.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PrdRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PrdSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<&PrdRecord> for PrdSummary {
    fn from(record: &PrdRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            created_at: record.created_at,
        }
    }
}
