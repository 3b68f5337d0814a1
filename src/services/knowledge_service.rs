use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{KnowledgeGraph, KnowledgeRecord, KnowledgeSummary},
        dto::request::{ExtractKnowledgeRequest, SaveKnowledgeRequest},
        dto::response::{KnowledgeExtractResponse, KnowledgeListResponse},
    },
    repositories::KnowledgeRepository,
    services::generation_pipeline::{GenerationPipeline, KnowledgeSource},
};

pub struct KnowledgeService {
    pipeline: Arc<GenerationPipeline>,
    repository: Arc<dyn KnowledgeRepository>,
}

impl KnowledgeService {
    pub fn new(
        pipeline: Arc<GenerationPipeline>,
        repository: Arc<dyn KnowledgeRepository>,
    ) -> Self {
        Self {
            pipeline,
            repository,
        }
    }

    /// Extracts a knowledge graph from the reference and keeps it as the
    /// working copy served by `current`.
    pub async fn extract(
        &self,
        request: &ExtractKnowledgeRequest,
    ) -> AppResult<KnowledgeExtractResponse> {
        let source = match (&request.reference_url, &request.reference_info) {
            (Some(url), _) if !url.trim().is_empty() => KnowledgeSource::Url(url),
            (_, Some(info)) => KnowledgeSource::PageInfo(info),
            _ => {
                return Err(AppError::ValidationError(
                    "Either reference_url or reference_info is required".into(),
                ))
            }
        };

        let run = self.pipeline.knowledge_graph(source).await;

        let dangling = run.value.dangling_edge_references();
        if !dangling.is_empty() {
            log::warn!(
                "Knowledge graph references {} unknown node id(s): {}",
                dangling.len(),
                dangling.join(", ")
            );
        }

        self.repository.save_working_copy(&run.value).await?;

        Ok(KnowledgeExtractResponse {
            graph: run.value,
            status: run.status.as_str().to_string(),
        })
    }

    pub async fn save(&self, request: &SaveKnowledgeRequest) -> AppResult<KnowledgeSummary> {
        let record = KnowledgeRecord {
            id: Uuid::new_v4().to_string(),
            name: request.name.clone(),
            graph: request.graph.clone(),
            created_at: Utc::now(),
        };
        let record = self.repository.save(record).await?;
        log::info!(
            "Saved knowledge graph {} ({}) with {} node(s)",
            record.id,
            record.name,
            record.graph.node_count()
        );

        Ok(KnowledgeSummary::from(&record))
    }

    pub async fn list(&self) -> AppResult<KnowledgeListResponse> {
        let records = self.repository.list().await?;
        Ok(KnowledgeListResponse {
            knowledge_graphs: records.iter().map(KnowledgeSummary::from).collect(),
        })
    }

    pub async fn current(&self) -> AppResult<KnowledgeGraph> {
        self.repository
            .load_working_copy()
            .await?
            .ok_or_else(|| AppError::NotFound("No knowledge graph extracted yet".into()))
    }

    pub async fn get(&self, id: &str) -> AppResult<KnowledgeRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Knowledge graph '{}'", id)))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("Knowledge graph '{}'", id)));
        }
        log::info!("Deleted knowledge graph {}", id);
        Ok(())
    }

    pub async fn download(&self, id: &str) -> AppResult<(String, Vec<u8>)> {
        let record = self.get(id).await?;
        let bytes = serde_json::to_vec_pretty(&record)?;
        Ok((format!("knowledge_{}.json", record.id), bytes))
    }
}
