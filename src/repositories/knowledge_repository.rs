use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{KnowledgeGraph, KnowledgeRecord},
    repositories::file_store,
};

#[async_trait]
pub trait KnowledgeRepository: Send + Sync {
    async fn save(&self, record: KnowledgeRecord) -> AppResult<KnowledgeRecord>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<KnowledgeRecord>>;
    async fn list(&self) -> AppResult<Vec<KnowledgeRecord>>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
    /// The working copy is the most recently extracted graph, kept
    /// outside the record store so extraction does not mint ids.
    async fn save_working_copy(&self, graph: &KnowledgeGraph) -> AppResult<()>;
    async fn load_working_copy(&self) -> AppResult<Option<KnowledgeGraph>>;
}

pub struct FileKnowledgeRepository {
    records_dir: PathBuf,
    working_path: PathBuf,
}

impl FileKnowledgeRepository {
    pub fn new(data_dir: &Path) -> Self {
        let root = data_dir.join("knowledge");
        Self {
            records_dir: root.join("records"),
            working_path: root.join("working.json"),
        }
    }

    pub async fn ensure_dirs(&self) -> AppResult<()> {
        file_store::ensure_dir(&self.records_dir).await
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.records_dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl KnowledgeRepository for FileKnowledgeRepository {
    async fn save(&self, record: KnowledgeRecord) -> AppResult<KnowledgeRecord> {
        if !file_store::is_safe_id(&record.id) {
            return Err(AppError::ValidationError(format!(
                "Invalid knowledge graph id '{}'",
                record.id
            )));
        }
        let path = self.record_path(&record.id);
        if tokio::fs::try_exists(&path).await? {
            return Err(AppError::AlreadyExists(format!(
                "Knowledge graph '{}'",
                record.id
            )));
        }
        file_store::write_json_atomic(&path, &record).await?;
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<KnowledgeRecord>> {
        if !file_store::is_safe_id(id) {
            return Ok(None);
        }
        file_store::read_json(&self.record_path(id)).await
    }

    async fn list(&self) -> AppResult<Vec<KnowledgeRecord>> {
        let mut records: Vec<KnowledgeRecord> =
            file_store::scan_records(&self.records_dir).await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        if !file_store::is_safe_id(id) {
            return Ok(false);
        }
        file_store::remove_file(&self.record_path(id)).await
    }

    async fn save_working_copy(&self, graph: &KnowledgeGraph) -> AppResult<()> {
        file_store::write_json_atomic(&self.working_path, graph).await
    }

    async fn load_working_copy(&self) -> AppResult<Option<KnowledgeGraph>> {
        file_store::read_json(&self.working_path).await
    }
}
