use serde::Deserialize;
use validator::Validate;

use crate::models::domain::KnowledgeGraph;

/// Reference input for PRD generation. Exactly one of `reference_url` or
/// `reference_html` must carry a value; the service enforces the either-or
/// rule because it is not expressible as a field validator.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GeneratePrdRequest {
    #[validate(url(message = "reference_url must be a valid URL"))]
    pub reference_url: Option<String>,

    pub reference_html: Option<String>,

    pub user_goal: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SavePrdRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExtractKnowledgeRequest {
    #[validate(url(message = "reference_url must be a valid URL"))]
    pub reference_url: Option<String>,

    pub reference_info: Option<ReferenceInfo>,
}

/// Pre-digested page description, as produced by the markup upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceInfo {
    pub title: String,

    #[serde(default)]
    pub structure: Vec<serde_json::Value>,

    #[serde(default)]
    pub text_blocks: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveKnowledgeRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub graph: KnowledgeGraph,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteTaskRequest {
    pub prd: PrdInput,
    pub knowledge_graph: KnowledgeGraphInput,
    pub user_note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrdInput {
    #[serde(default)]
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeGraphInput {
    #[serde(default)]
    pub name: String,
    pub graph: KnowledgeGraph,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateKnowledgePointRequest {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 1))]
    pub label: String,

    #[serde(rename = "type", default)]
    pub node_type: String,

    #[serde(default)]
    pub select_element: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateTestTaskRequest {
    #[validate(length(min = 1))]
    pub topic_id: String,

    pub knowledge_node: serde_json::Value,

    pub learning_content: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadMarkupRequest {
    pub filename: Option<String>,

    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}
