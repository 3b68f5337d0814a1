use std::io::Write;
use std::sync::Arc;

use uuid::Uuid;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{TaskRecord, TaskSummary, TASK_STATUS_FALLBACK, TASK_STATUS_SUCCESS},
        dto::request::ExecuteTaskRequest,
        dto::response::{ExecuteTaskResponse, LogsResponse, TaskStatusResponse},
    },
    repositories::TaskRepository,
    services::generation_pipeline::{GenerationPipeline, RunStatus},
};

/// Served when a task has no HTML file to preview.
const PREVIEW_PLACEHOLDER: &str = "<!DOCTYPE html>\n<html>\n<head><title>No preview</title></head>\n<body><p>This task produced no HTML page to preview.</p></body>\n</html>\n";

pub struct ExecutorService {
    pipeline: Arc<GenerationPipeline>,
    repository: Arc<dyn TaskRepository>,
}

impl ExecutorService {
    pub fn new(pipeline: Arc<GenerationPipeline>, repository: Arc<dyn TaskRepository>) -> Self {
        Self {
            pipeline,
            repository,
        }
    }

    /// Runs one site-generation task end to end: invoke the pipeline,
    /// persist the artifact set under a fresh task id, report the outcome.
    pub async fn execute(&self, request: &ExecuteTaskRequest) -> AppResult<ExecuteTaskResponse> {
        let graph_json = serde_json::to_string_pretty(&request.knowledge_graph.graph)?;
        let note = request.user_note.as_deref().unwrap_or("");

        let run = self
            .pipeline
            .demo_site(&request.prd.content, &graph_json, note)
            .await;

        let (status, message) = match run.status {
            RunStatus::Succeeded => (TASK_STATUS_SUCCESS, "Website generated".to_string()),
            RunStatus::FellBack => (
                TASK_STATUS_FALLBACK,
                "Generated from the built-in template".to_string(),
            ),
        };

        let record = TaskRecord::new(
            Uuid::new_v4().to_string(),
            status,
            message,
            run.value.files,
            run.value.metadata,
            run.raw_response.unwrap_or_default(),
        );
        let record = self.repository.save(record).await?;
        log::info!(
            "Task {} finished with status '{}' and {} file(s)",
            record.task_id,
            record.status,
            record.files.len()
        );

        Ok(ExecuteTaskResponse {
            task_id: record.task_id,
            files: record.files,
            status: record.status,
        })
    }

    pub async fn status(&self, task_id: &str) -> AppResult<TaskStatusResponse> {
        let record = self.get(task_id).await?;
        Ok(TaskStatusResponse {
            task_id: record.task_id,
            status: record.status,
            message: record.message,
            files: record.files,
        })
    }

    /// Zips the artifact set in memory for download.
    pub async fn download(&self, task_id: &str) -> AppResult<(String, Vec<u8>)> {
        let record = self.get(task_id).await?;

        let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (path, body) in &record.file_map {
            writer.start_file(path.as_str(), options)?;
            writer.write_all(body.as_bytes())?;
        }
        let bytes = writer.finish()?.into_inner();

        Ok((format!("website_{}.zip", record.task_id), bytes))
    }

    pub async fn logs(&self) -> AppResult<LogsResponse> {
        let records = self.repository.list().await?;
        Ok(LogsResponse {
            logs: records.iter().map(TaskSummary::from).collect(),
        })
    }

    pub async fn get(&self, task_id: &str) -> AppResult<TaskRecord> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task '{}'", task_id)))
    }

    pub async fn delete(&self, task_id: &str) -> AppResult<()> {
        if !self.repository.delete(task_id).await? {
            return Err(AppError::NotFound(format!("Task '{}'", task_id)));
        }
        log::info!("Deleted task {}", task_id);
        Ok(())
    }

    /// The task's index page, or a placeholder when the artifact set has
    /// no HTML file.
    pub async fn preview_page(&self, task_id: &str) -> AppResult<String> {
        let record = self.get(task_id).await?;
        Ok(record
            .index_page()
            .unwrap_or(PREVIEW_PLACEHOLDER)
            .to_string())
    }

    /// A single artifact file plus the content type its extension implies.
    pub async fn preview_file(
        &self,
        task_id: &str,
        path: &str,
    ) -> AppResult<(&'static str, String)> {
        let record = self.get(task_id).await?;
        let body = record
            .file_map
            .get(path)
            .ok_or_else(|| AppError::NotFound(format!("File '{}' in task '{}'", path, task_id)))?;
        Ok((content_type_for(path), body.clone()))
    }
}

fn content_type_for(path: &str) -> &'static str {
    let extension = path.rsplit('.').next().unwrap_or("");
    match extension {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "md" | "txt" => "text/plain; charset=utf-8",
        _ => "text/plain; charset=utf-8",
    }
}
