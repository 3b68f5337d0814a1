use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{PrdRecord, PrdSummary},
        dto::request::{GeneratePrdRequest, SavePrdRequest},
        dto::response::{PrdGenerateResponse, PrdListResponse},
    },
    repositories::PrdRepository,
    services::generation_pipeline::{GenerationPipeline, PrdSource},
};

pub struct PrdService {
    pipeline: Arc<GenerationPipeline>,
    repository: Arc<dyn PrdRepository>,
}

impl PrdService {
    pub fn new(pipeline: Arc<GenerationPipeline>, repository: Arc<dyn PrdRepository>) -> Self {
        Self {
            pipeline,
            repository,
        }
    }

    /// Generates a PRD from a reference URL or pasted markup and keeps
    /// the result as the working copy.
    pub async fn generate(&self, request: &GeneratePrdRequest) -> AppResult<PrdGenerateResponse> {
        let source = match (&request.reference_url, &request.reference_html) {
            (Some(url), _) if !url.trim().is_empty() => PrdSource::Url(url),
            (_, Some(html)) if !html.trim().is_empty() => PrdSource::Markup(html),
            _ => {
                return Err(AppError::ValidationError(
                    "Either reference_url or reference_html is required".into(),
                ))
            }
        };
        let goal = request.user_goal.as_deref().unwrap_or("");

        let run = self.pipeline.requirements_doc(source, goal).await;
        self.repository.save_working_copy(&run.value).await?;

        Ok(PrdGenerateResponse {
            prd_text: run.value,
            status: run.status.as_str().to_string(),
        })
    }

    pub async fn save(&self, request: &SavePrdRequest) -> AppResult<PrdSummary> {
        let record = PrdRecord {
            id: Uuid::new_v4().to_string(),
            title: request.title.clone(),
            content: request.content.clone(),
            created_at: Utc::now(),
        };
        let record = self.repository.save(record).await?;
        log::info!("Saved PRD {} ({})", record.id, record.title);

        Ok(PrdSummary::from(&record))
    }

    pub async fn list(&self) -> AppResult<PrdListResponse> {
        let records = self.repository.list().await?;
        Ok(PrdListResponse {
            prds: records.iter().map(PrdSummary::from).collect(),
        })
    }

    pub async fn get(&self, id: &str) -> AppResult<PrdRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("PRD '{}'", id)))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("PRD '{}'", id)));
        }
        log::info!("Deleted PRD {}", id);
        Ok(())
    }

    /// Full record as a pretty-printed JSON attachment body.
    pub async fn download(&self, id: &str) -> AppResult<(String, Vec<u8>)> {
        let record = self.get(id).await?;
        let bytes = serde_json::to_vec_pretty(&record)?;
        Ok((format!("prd_{}.json", record.id), bytes))
    }
}
