use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    errors::{AppError, AppResult},
    models::domain::TaskRecord,
    repositories::file_store,
};

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists the record and materializes its file map as a real
    /// tree under the per-task site directory. The record is published
    /// last, so a half-written tree is never reachable through a
    /// visible record.
    async fn save(&self, record: TaskRecord) -> AppResult<TaskRecord>;
    async fn find_by_id(&self, task_id: &str) -> AppResult<Option<TaskRecord>>;
    async fn list(&self) -> AppResult<Vec<TaskRecord>>;
    async fn delete(&self, task_id: &str) -> AppResult<bool>;
}

pub struct FileTaskRepository {
    records_dir: PathBuf,
    sites_dir: PathBuf,
}

impl FileTaskRepository {
    pub fn new(data_dir: &Path) -> Self {
        let root = data_dir.join("tasks");
        Self {
            records_dir: root.join("records"),
            sites_dir: root.join("sites"),
        }
    }

    pub async fn ensure_dirs(&self) -> AppResult<()> {
        file_store::ensure_dir(&self.records_dir).await?;
        file_store::ensure_dir(&self.sites_dir).await
    }

    fn record_path(&self, task_id: &str) -> PathBuf {
        self.records_dir.join(format!("{}.json", task_id))
    }

    fn site_root(&self, task_id: &str) -> PathBuf {
        self.sites_dir.join(task_id)
    }

    async fn materialize_site(&self, record: &TaskRecord) -> AppResult<()> {
        let site_root = self.site_root(&record.task_id);
        for (relative, body) in &record.file_map {
            let target = file_store::safe_join(&site_root, relative)?;
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&target, body.as_bytes()).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FileTaskRepository {
    async fn save(&self, record: TaskRecord) -> AppResult<TaskRecord> {
        if !file_store::is_safe_id(&record.task_id) {
            return Err(AppError::ValidationError(format!(
                "Invalid task id '{}'",
                record.task_id
            )));
        }
        let path = self.record_path(&record.task_id);
        if tokio::fs::try_exists(&path).await? {
            return Err(AppError::AlreadyExists(format!("Task '{}'", record.task_id)));
        }

        self.materialize_site(&record).await?;
        file_store::write_json_atomic(&path, &record).await?;
        Ok(record)
    }

    async fn find_by_id(&self, task_id: &str) -> AppResult<Option<TaskRecord>> {
        if !file_store::is_safe_id(task_id) {
            return Ok(None);
        }
        file_store::read_json(&self.record_path(task_id)).await
    }

    async fn list(&self) -> AppResult<Vec<TaskRecord>> {
        let mut records: Vec<TaskRecord> = file_store::scan_records(&self.records_dir).await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn delete(&self, task_id: &str) -> AppResult<bool> {
        if !file_store::is_safe_id(task_id) {
            return Ok(false);
        }
        let removed = file_store::remove_file(&self.record_path(task_id)).await?;
        if removed {
            match tokio::fs::remove_dir_all(self.site_root(task_id)).await {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(removed)
    }
}
