use std::sync::Arc;

use crate::{
    models::{
        domain::{LearningContent, TopicInfo},
        dto::request::GenerateKnowledgePointRequest,
    },
    services::generation_pipeline::GenerationPipeline,
};

pub struct LearningService {
    pipeline: Arc<GenerationPipeline>,
}

impl LearningService {
    pub fn new(pipeline: Arc<GenerationPipeline>) -> Self {
        Self { pipeline }
    }

    /// Four-level learning content for one knowledge point.
    pub async fn generate(&self, request: &GenerateKnowledgePointRequest) -> LearningContent {
        let topic = TopicInfo {
            topic_id: request.id.clone(),
            label: request.label.clone(),
            node_type: request.node_type.clone(),
            select_element: request.select_element.clone(),
        };
        self.pipeline.learning_content(&topic).await.value
    }
}
