//! Shared filesystem primitives for the JSON record stores.
//!
//! Records are published atomically: the full payload is serialized in
//! memory, written to a sibling `.tmp` file and renamed into place. A
//! write that fails partway leaves no visible record behind.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{AppError, AppResult};

pub async fn ensure_dir(path: &Path) -> AppResult<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}

pub async fn write_atomic(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

pub async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    write_atomic(path, &bytes).await
}

/// Reads and parses a JSON record, mapping a missing file to `Ok(None)`.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub async fn read_string(path: &Path) -> AppResult<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub async fn remove_file(path: &Path) -> AppResult<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Parses every `.json` entry in `dir` into `T`, skipping entries that
/// fail to read or parse. The scan is a snapshot: records appearing or
/// disappearing mid-scan are tolerated, not errors.
pub async fn scan_records<T: DeserializeOwned>(dir: &Path) -> AppResult<Vec<T>> {
    let mut records = Vec::new();
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(records),
        Err(err) => return Err(err.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(_) => continue,
        };
        match serde_json::from_str::<T>(&contents) {
            Ok(record) => records.push(record),
            Err(err) => {
                log::warn!("Skipping unreadable record {}: {}", path.display(), err);
            }
        }
    }

    Ok(records)
}

/// Record ids double as file names, so only a conservative character
/// set is allowed through to the filesystem.
pub fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Joins a client-supplied relative path onto `root`, rejecting
/// traversal segments. Separators may be `/` or `\`; empty and `.`
/// segments are dropped.
pub fn safe_join(root: &Path, relative: &str) -> AppResult<PathBuf> {
    let mut path = root.to_path_buf();
    let mut pushed = false;

    for segment in relative.split(|c| c == '/' || c == '\\') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." || segment.contains('\0') {
            return Err(AppError::ValidationError(format!(
                "Unsafe path segment in '{}'",
                relative
            )));
        }
        path.push(segment);
        pushed = true;
    }

    if !pushed {
        return Err(AppError::ValidationError(format!(
            "Empty relative path '{}'",
            relative
        )));
    }
    Ok(path)
}
