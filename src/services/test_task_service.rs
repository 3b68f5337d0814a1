use std::sync::Arc;

use serde_json::Value;

use crate::{
    models::{
        domain::{TestTask, TopicInfo},
        dto::request::GenerateTestTaskRequest,
    },
    services::generation_pipeline::GenerationPipeline,
};

pub struct TestTaskService {
    pipeline: Arc<GenerationPipeline>,
}

impl TestTaskService {
    pub fn new(pipeline: Arc<GenerationPipeline>) -> Self {
        Self { pipeline }
    }

    pub async fn generate(&self, request: &GenerateTestTaskRequest) -> TestTask {
        let topic = topic_from_node(&request.topic_id, &request.knowledge_node);
        self.pipeline
            .test_task(&topic, request.learning_content.as_ref())
            .await
            .value
    }
}

/// Clients send the knowledge node either as the cytoscape shape
/// (`{"data": {...}}`) or flattened; field names follow the graph wire
/// format. Anything missing falls back to the request's `topic_id`.
fn topic_from_node(topic_id: &str, node: &Value) -> TopicInfo {
    let data = node.get("data").unwrap_or(node);
    let id = data
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or(topic_id);
    let label = data.get("label").and_then(Value::as_str).unwrap_or(id);
    let node_type = data
        .get("category")
        .and_then(Value::as_str)
        .or_else(|| data.get("type").and_then(Value::as_str))
        .unwrap_or("");
    let select_element = data
        .get("selectElement")
        .or_else(|| data.get("select_element"))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    TopicInfo {
        topic_id: id.to_string(),
        label: label.to_string(),
        node_type: node_type.to_string(),
        select_element,
    }
}
