use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    errors::{AppError, AppResult},
    models::domain::PrdRecord,
    repositories::file_store,
};

#[async_trait]
pub trait PrdRepository: Send + Sync {
    async fn save(&self, record: PrdRecord) -> AppResult<PrdRecord>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<PrdRecord>>;
    async fn list(&self) -> AppResult<Vec<PrdRecord>>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
    async fn save_working_copy(&self, content: &str) -> AppResult<()>;
    async fn load_working_copy(&self) -> AppResult<Option<String>>;
}

pub struct FilePrdRepository {
    records_dir: PathBuf,
    working_path: PathBuf,
}

impl FilePrdRepository {
    pub fn new(data_dir: &Path) -> Self {
        let root = data_dir.join("prd");
        Self {
            records_dir: root.join("records"),
            working_path: root.join("working.txt"),
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
impl PrdRepository for FilePrdRepository {
    async fn save(&self, record: PrdRecord) -> AppResult<PrdRecord> {
        if !file_store::is_safe_id(&record.id) {
            return Err(AppError::ValidationError(format!(
                "Invalid PRD id '{}'",
                record.id
            )));
        }
        let path = self.record_path(&record.id);
        if tokio::fs::try_exists(&path).await? {
            return Err(AppError::AlreadyExists(format!("PRD '{}'", record.id)));
        }
        file_store::write_json_atomic(&path, &record).await?;
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<PrdRecord>> {
        if !file_store::is_safe_id(id) {
            return Ok(None);
        }
        file_store::read_json(&self.record_path(id)).await
    }

    async fn list(&self) -> AppResult<Vec<PrdRecord>> {
        let mut records: Vec<PrdRecord> = file_store::scan_records(&self.records_dir).await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        if !file_store::is_safe_id(id) {
            return Ok(false);
        }
        file_store::remove_file(&self.record_path(id)).await
    }

    async fn save_working_copy(&self, content: &str) -> AppResult<()> {
        file_store::write_atomic(&self.working_path, content.as_bytes()).await
    }

    async fn load_working_copy(&self) -> AppResult<Option<String>> {
        file_store::read_string(&self.working_path).await
    }
}
