use std::sync::Arc;

use tempfile::TempDir;

use crate::{app_state::AppState, config::Config, models::domain::KnowledgeGraph};

/// Mock-mode application state over a throwaway data dir. The TempDir
/// must outlive the test or the stores lose their backing files.
pub async fn mock_state() -> (Arc<AppState>, TempDir) {
    let dir = tempfile::tempdir().expect("create temp data dir");
    let state = AppState::new(Config::test_config(dir.path()))
        .await
        .expect("build app state");
    (Arc::new(state), dir)
}

/// The deterministic three-node graph every mock extraction returns.
pub fn sample_graph() -> KnowledgeGraph {
    crate::services::fallbacks::knowledge_graph()
}

pub fn sample_graph_json() -> serde_json::Value {
    serde_json::to_value(sample_graph()).expect("graph serializes")
}

pub fn sample_execute_body() -> serde_json::Value {
    serde_json::json!({
        "prd": {
            "title": "Demo site",
            "content": "# PRD\n\nBuild a small single-page demo with a header and main column."
        },
        "knowledge_graph": {
            "name": "demo graph",
            "graph": sample_graph_json()
        },
        "user_note": "keep it minimal"
    })
}
