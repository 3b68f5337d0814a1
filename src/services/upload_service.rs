use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::dto::{
        request::UploadMarkupRequest,
        response::{MarkupUploadResponse, StructureNode, UploadListResponse, UploadedFileInfo},
    },
    repositories::file_store,
};

static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("TITLE is a valid selector"));
static FIRST_HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("FIRST_HEADING is a valid selector"));
static TEXT_BLOCKS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, p, li").expect("TEXT_BLOCKS is a valid selector")
});
static BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("BODY is a valid selector"));

const MAX_TEXT_BLOCKS: usize = 10;
const MAX_NODE_TEXT: usize = 80;

pub struct UploadService {
    uploads_dir: PathBuf,
}

impl UploadService {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            uploads_dir: data_dir.join("uploads"),
        }
    }

    pub async fn ensure_dirs(&self) -> AppResult<()> {
        file_store::ensure_dir(&self.uploads_dir).await
    }

    /// Parses the uploaded markup into the reference-info shape the
    /// knowledge extractor consumes, then stores the raw file.
    pub async fn handle_upload(
        &self,
        request: &UploadMarkupRequest,
    ) -> AppResult<MarkupUploadResponse> {
        let (title, structure, text_blocks) = parse_markup(&request.content);

        let stored_name = sanitize_filename(request.filename.as_deref())?;
        let stamp = Uuid::new_v4().simple().to_string();
        let stored_name = format!("{}_{}", &stamp[..8], stored_name);
        tokio::fs::write(self.uploads_dir.join(&stored_name), &request.content).await?;
        log::info!("Stored uploaded markup as {}", stored_name);

        Ok(MarkupUploadResponse {
            title,
            structure,
            text_blocks,
            message: format!("Markup stored as {}", stored_name),
        })
    }

    pub async fn list(&self) -> AppResult<UploadListResponse> {
        let mut files = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.uploads_dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(UploadListResponse { files })
            }
            Err(err) => return Err(err.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_markup = matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("html") | Some("htm")
            );
            if !is_markup {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let metadata = entry.metadata().await?;
            files.push(UploadedFileInfo {
                filename: filename.to_string(),
                size: metadata.len(),
                modified: DateTime::<Utc>::from(metadata.modified()?),
            });
        }

        files.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(UploadListResponse { files })
    }
}

/// All scraper work happens here so the non-`Send` DOM never crosses an
/// await point.
fn parse_markup(content: &str) -> (String, Vec<StructureNode>, Vec<String>) {
    let document = Html::parse_document(content);

    let title = document
        .select(&TITLE)
        .next()
        .or_else(|| document.select(&FIRST_HEADING).next())
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "Untitled page".to_string());

    let text_blocks: Vec<String> = document
        .select(&TEXT_BLOCKS)
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .take(MAX_TEXT_BLOCKS)
        .collect();

    let structure = document
        .select(&BODY)
        .next()
        .map(|body| {
            element_children(body)
                .map(|child| structure_node(child, 0))
                .collect()
        })
        .unwrap_or_default();

    (title, structure, text_blocks)
}

fn element_children<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| !matches!(child.value().name(), "script" | "style"))
}

/// Two levels deep: a page skeleton, not the full DOM.
fn structure_node(element: ElementRef<'_>, depth: usize) -> StructureNode {
    let value = element.value();
    let text = truncate_chars(
        &collapse_whitespace(&element.text().collect::<String>()),
        MAX_NODE_TEXT,
    );
    let children = if depth == 0 {
        element_children(element)
            .map(|child| structure_node(child, depth + 1))
            .collect()
    } else {
        Vec::new()
    };

    StructureNode {
        tag: value.name().to_string(),
        id: value.id().map(str::to_string),
        classes: value.classes().map(str::to_string).collect(),
        text: (!text.is_empty()).then_some(text),
        children,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Keeps only the final path segment and requires an HTML extension, so
/// a hostile filename cannot place the upload outside the uploads dir.
fn sanitize_filename(filename: Option<&str>) -> AppResult<String> {
    let name = filename.unwrap_or("upload.html").trim();
    let name = name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();
    let lowered = name.to_ascii_lowercase();
    if !(lowered.ends_with(".html") || lowered.ends_with(".htm")) {
        return Err(AppError::ValidationError(
            "Only .html or .htm uploads are accepted".into(),
        ));
    }
    Ok(name.to_string())
}
