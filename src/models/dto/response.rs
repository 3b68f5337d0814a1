use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{KnowledgeGraph, KnowledgeSummary, PrdSummary, TaskSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrdGenerateResponse {
    pub prd_text: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrdListResponse {
    pub prds: Vec<PrdSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeExtractResponse {
    pub graph: KnowledgeGraph,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeListResponse {
    pub knowledge_graphs: Vec<KnowledgeSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteTaskResponse {
    pub task_id: String,
    pub files: Vec<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    pub task_id: String,
    pub status: String,
    pub message: String,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    pub logs: Vec<TaskSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Shallow skeleton of an uploaded page, one level below `<body>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureNode {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StructureNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupUploadResponse {
    pub title: String,
    pub structure: Vec<StructureNode>,
    pub text_blocks: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFileInfo {
    pub filename: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadListResponse {
    pub files: Vec<UploadedFileInfo>,
}
