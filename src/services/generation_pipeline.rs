use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::constants::prompts;
use crate::models::domain::{KnowledgeGraph, LearningContent, SiteMetadata, TestTask, TopicInfo};
use crate::models::dto::request::ReferenceInfo;
use crate::services::extractors::{self, ExtractionError};
use crate::services::fallbacks;
use crate::services::model_service::{ChatMessage, ModelClient, ModelError};
use crate::services::sanitizer;

/// One generation task per variant. The role mapping mirrors how the work is
/// priced: graph extraction runs on the fast model, writing tasks on the slow
/// one, site generation on the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    RequirementsDoc,
    KnowledgeGraph,
    LearningContent,
    TestTask,
    DemoSite,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::RequirementsDoc => "requirements document",
            TaskKind::KnowledgeGraph => "knowledge graph",
            TaskKind::LearningContent => "learning content",
            TaskKind::TestTask => "test task",
            TaskKind::DemoSite => "demo site",
        }
    }

    pub fn role(&self) -> crate::services::model_service::ModelRole {
        use crate::services::model_service::ModelRole;
        match self {
            TaskKind::KnowledgeGraph => ModelRole::Fast,
            TaskKind::DemoSite => ModelRole::Executor,
            _ => ModelRole::Slow,
        }
    }
}

/// Why a run abandoned the model output and substituted the fallback. Never
/// surfaced over HTTP; the pipeline converts every case into a normal result.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("empty model response")]
    EmptyResponse,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("no annotated code blocks in model response")]
    NoCodeBlocks,

    #[error("model response did not match the expected shape: {0}")]
    SchemaMismatch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    FellBack,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Succeeded => "success",
            RunStatus::FellBack => "fallback",
        }
    }
}

/// Outcome of one pipeline run. `raw_response` keeps whatever the model sent
/// for diagnostics, including runs that fell back after a parse failure.
#[derive(Debug, Clone)]
pub struct PipelineRun<T> {
    pub value: T,
    pub status: RunStatus,
    pub raw_response: Option<String>,
}

impl<T> PipelineRun<T> {
    fn succeeded(value: T, raw: String) -> Self {
        Self {
            value,
            status: RunStatus::Succeeded,
            raw_response: Some(raw),
        }
    }

    fn fell_back(value: T, raw: Option<String>) -> Self {
        Self {
            value,
            status: RunStatus::FellBack,
            raw_response: raw,
        }
    }
}

#[derive(Debug, Clone)]
pub enum PrdSource<'a> {
    Url(&'a str),
    Markup(&'a str),
}

#[derive(Debug, Clone)]
pub enum KnowledgeSource<'a> {
    Url(&'a str),
    PageInfo(&'a ReferenceInfo),
}

/// Everything one site-generation run produced before persistence.
#[derive(Debug, Clone)]
pub struct SiteBundle {
    pub files: IndexMap<String, String>,
    pub metadata: Option<SiteMetadata>,
}

/// Runs one model call per task: build the prompt, invoke, sanitize, extract,
/// and on any failure substitute the task's deterministic fallback. No
/// retries. In mock mode the model is never contacted and the fallback is
/// served directly.
pub struct GenerationPipeline {
    client: Arc<dyn ModelClient>,
    mock_mode: bool,
}

impl GenerationPipeline {
    pub fn new(client: Arc<dyn ModelClient>, mock_mode: bool) -> Self {
        if mock_mode {
            log::info!("generation pipeline running in mock mode");
        }
        Self { client, mock_mode }
    }

    pub async fn requirements_doc(
        &self,
        source: PrdSource<'_>,
        user_goal: &str,
    ) -> PipelineRun<String> {
        let kind = TaskKind::RequirementsDoc;
        if self.mock_mode {
            return PipelineRun::fell_back(fallbacks::requirements_doc(), None);
        }

        let prompt = match source {
            PrdSource::Url(url) => prompts::website_analysis_prompt(url),
            PrdSource::Markup(html) => prompts::prd_from_markup_prompt(html, user_goal),
        };
        let raw = match self.invoke(kind, vec![ChatMessage::user(prompt)]).await {
            Ok(raw) => raw,
            Err(err) => {
                log_fallback(kind, &err, None);
                return PipelineRun::fell_back(fallbacks::requirements_doc(), None);
            }
        };

        let text = raw.trim().to_string();
        PipelineRun::succeeded(text, raw)
    }

    pub async fn knowledge_graph(&self, source: KnowledgeSource<'_>) -> PipelineRun<KnowledgeGraph> {
        let kind = TaskKind::KnowledgeGraph;
        if self.mock_mode {
            return PipelineRun::fell_back(fallbacks::knowledge_graph(), None);
        }

        let prompt = match source {
            KnowledgeSource::Url(url) => prompts::knowledge_points_prompt(url),
            KnowledgeSource::PageInfo(info) => prompts::knowledge_points_from_info_prompt(info),
        };
        let raw = match self.invoke(kind, vec![ChatMessage::user(prompt)]).await {
            Ok(raw) => raw,
            Err(err) => {
                log_fallback(kind, &err, None);
                return PipelineRun::fell_back(fallbacks::knowledge_graph(), None);
            }
        };

        match parse_json_response::<KnowledgeGraph>(&raw) {
            Ok(graph) if !graph.nodes.is_empty() => PipelineRun::succeeded(graph, raw),
            Ok(_) => {
                let err = GenerationError::SchemaMismatch("graph has no nodes".into());
                log_fallback(kind, &err, Some(&raw));
                PipelineRun::fell_back(fallbacks::knowledge_graph(), Some(raw))
            }
            Err(err) => {
                log_fallback(kind, &err, Some(&raw));
                PipelineRun::fell_back(fallbacks::knowledge_graph(), Some(raw))
            }
        }
    }

    pub async fn learning_content(&self, topic: &TopicInfo) -> PipelineRun<LearningContent> {
        let kind = TaskKind::LearningContent;
        if self.mock_mode {
            return PipelineRun::fell_back(fallbacks::learning_content(topic), None);
        }

        let messages = vec![
            ChatMessage::system(prompts::LEARNING_MENTOR_SYSTEM_PROMPT),
            ChatMessage::user(prompts::learning_content_prompt(topic)),
        ];
        let raw = match self.invoke(kind, messages).await {
            Ok(raw) => raw,
            Err(err) => {
                log_fallback(kind, &err, None);
                return PipelineRun::fell_back(fallbacks::learning_content(topic), None);
            }
        };

        match parse_json_response::<LearningContent>(&raw) {
            Ok(content) if content.has_complete_levels() => PipelineRun::succeeded(content, raw),
            Ok(content) => {
                let err = GenerationError::SchemaMismatch(format!(
                    "expected 4 ordered levels, got {}",
                    content.levels.len()
                ));
                log_fallback(kind, &err, Some(&raw));
                PipelineRun::fell_back(fallbacks::learning_content(topic), Some(raw))
            }
            Err(err) => {
                log_fallback(kind, &err, Some(&raw));
                PipelineRun::fell_back(fallbacks::learning_content(topic), Some(raw))
            }
        }
    }

    pub async fn test_task(
        &self,
        topic: &TopicInfo,
        learning_content: Option<&serde_json::Value>,
    ) -> PipelineRun<TestTask> {
        let kind = TaskKind::TestTask;
        if self.mock_mode {
            return PipelineRun::fell_back(fallbacks::test_task(topic), None);
        }

        let messages = vec![
            ChatMessage::system(prompts::TEST_AUTHOR_SYSTEM_PROMPT),
            ChatMessage::user(prompts::test_task_prompt(topic, learning_content)),
        ];
        let raw = match self.invoke(kind, messages).await {
            Ok(raw) => raw,
            Err(err) => {
                log_fallback(kind, &err, None);
                return PipelineRun::fell_back(fallbacks::test_task(topic), None);
            }
        };

        match parse_json_response::<TestTask>(&raw) {
            Ok(task) => PipelineRun::succeeded(task, raw),
            Err(err) => {
                log_fallback(kind, &err, Some(&raw));
                PipelineRun::fell_back(fallbacks::test_task(topic), Some(raw))
            }
        }
    }

    pub async fn demo_site(
        &self,
        prd_text: &str,
        graph_json: &str,
        user_note: &str,
    ) -> PipelineRun<SiteBundle> {
        let kind = TaskKind::DemoSite;
        if self.mock_mode {
            return PipelineRun::fell_back(fallback_site_bundle(), None);
        }

        let messages = vec![
            ChatMessage::system(prompts::SITE_BUILDER_SYSTEM_PROMPT),
            ChatMessage::user(prompts::demo_site_prompt(prd_text, graph_json, user_note)),
        ];
        let raw = match self.invoke(kind, messages).await {
            Ok(raw) => raw,
            Err(err) => {
                log_fallback(kind, &err, None);
                return PipelineRun::fell_back(fallback_site_bundle(), None);
            }
        };

        // File bodies depend on line structure, so only trim here.
        let files = extractors::extract_file_blocks(raw.trim());
        if files.is_empty() {
            let err = GenerationError::NoCodeBlocks;
            log_fallback(kind, &err, Some(&raw));
            return PipelineRun::fell_back(fallback_site_bundle(), Some(raw));
        }

        let metadata = extractors::extract_summary_block(&raw)
            .and_then(|value| serde_json::from_value::<SiteMetadata>(value).ok());
        log::info!(
            "demo site generated with {} file(s), summary {}",
            files.len(),
            if metadata.is_some() { "parsed" } else { "absent" },
        );
        PipelineRun::succeeded(SiteBundle { files, metadata }, raw)
    }

    async fn invoke(
        &self,
        kind: TaskKind,
        messages: Vec<ChatMessage>,
    ) -> Result<String, GenerationError> {
        log::info!("invoking {} model for {}", kind.role(), kind.label());
        let raw = self.client.complete(kind.role(), messages).await?;
        if raw.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(raw)
    }
}

fn fallback_site_bundle() -> SiteBundle {
    let (files, metadata) = fallbacks::demo_site();
    SiteBundle {
        files,
        metadata: Some(metadata),
    }
}

/// JSON-shaped tasks share one path: strict sanitize, JSON recovery, then a
/// typed deserialize that doubles as the schema check.
fn parse_json_response<T: DeserializeOwned>(raw: &str) -> Result<T, GenerationError> {
    let cleaned = sanitizer::sanitize(raw);
    let value = extractors::extract_json(&cleaned)?;
    serde_json::from_value(value).map_err(|err| GenerationError::SchemaMismatch(err.to_string()))
}

fn log_fallback(kind: TaskKind, err: &GenerationError, raw: Option<&str>) {
    match raw {
        Some(raw) => log::warn!(
            "{} generation fell back: {} (response head: {})",
            kind.label(),
            err,
            response_head(raw),
        ),
        None => log::warn!("{} generation fell back: {}", kind.label(), err),
    }
}

/// First 500 characters, respecting char boundaries.
fn response_head(raw: &str) -> String {
    raw.chars().take(500).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::model_service::{MockModelClient, ModelRole};

    fn pipeline_with(client: MockModelClient) -> GenerationPipeline {
        GenerationPipeline::new(Arc::new(client), false)
    }

    fn mock_pipeline() -> GenerationPipeline {
        // No expectations set: any call to the client panics the test.
        GenerationPipeline::new(Arc::new(MockModelClient::new()), true)
    }

    fn topic() -> TopicInfo {
        TopicInfo {
            topic_id: "style_basic".into(),
            label: "Base styling".into(),
            node_type: "media-block".into(),
            select_element: vec!["style".into()],
        }
    }

    #[actix_web::test]
    async fn test_mock_mode_never_calls_the_model() {
        let pipeline = mock_pipeline();

        let run = pipeline.knowledge_graph(KnowledgeSource::Url("https://example.com")).await;
        assert_eq!(run.status, RunStatus::FellBack);
        assert_eq!(run.value.node_count(), 3);

        let run = pipeline
            .requirements_doc(PrdSource::Url("https://example.com"), "")
            .await;
        assert_eq!(run.status, RunStatus::FellBack);
        assert!(run.value.contains("Requirements"));
    }

    #[actix_web::test]
    async fn test_knowledge_graph_success() {
        let mut client = MockModelClient::new();
        client.expect_complete().returning(|role, _| {
            assert_eq!(role, ModelRole::Fast);
            Ok(r#"{"nodes": [{"data": {"id": "n1", "label": "Node one"}}]}"#.to_string())
        });

        let run = pipeline_with(client)
            .knowledge_graph(KnowledgeSource::Url("https://example.com"))
            .await;
        assert_eq!(run.status, RunStatus::Succeeded);
        assert_eq!(run.value.nodes[0].data.id, "n1");
        assert!(run.raw_response.is_some());
    }

    #[actix_web::test]
    async fn test_knowledge_graph_falls_back_on_garbage() {
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .returning(|_, _| Ok("not json at all".to_string()));

        let run = pipeline_with(client)
            .knowledge_graph(KnowledgeSource::Url("https://example.com"))
            .await;
        assert_eq!(run.status, RunStatus::FellBack);
        let ids: Vec<&str> = run.value.nodes.iter().map(|n| n.data.id.as_str()).collect();
        assert_eq!(ids, ["chapter1", "text_paragraph", "style_basic"]);
        assert_eq!(run.raw_response.as_deref(), Some("not json at all"));
    }

    #[actix_web::test]
    async fn test_knowledge_graph_falls_back_on_empty_node_list() {
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .returning(|_, _| Ok(r#"{"nodes": []}"#.to_string()));

        let run = pipeline_with(client)
            .knowledge_graph(KnowledgeSource::Url("https://example.com"))
            .await;
        assert_eq!(run.status, RunStatus::FellBack);
        assert_eq!(run.value.node_count(), 3);
    }

    #[actix_web::test]
    async fn test_knowledge_graph_accepts_fenced_response() {
        let mut client = MockModelClient::new();
        client.expect_complete().returning(|_, _| {
            Ok("```json\n{\"nodes\": [{\"data\": {\"id\": \"x\", \"label\": \"X\"}}]}\n```"
                .to_string())
        });

        let run = pipeline_with(client)
            .knowledge_graph(KnowledgeSource::Url("https://example.com"))
            .await;
        assert_eq!(run.status, RunStatus::Succeeded);
        assert_eq!(run.value.nodes[0].data.id, "x");
    }

    #[actix_web::test]
    async fn test_requirements_doc_falls_back_on_timeout() {
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .returning(|_, _| Err(ModelError::Timeout(60)));

        let run = pipeline_with(client)
            .requirements_doc(PrdSource::Url("https://example.com"), "")
            .await;
        assert_eq!(run.status, RunStatus::FellBack);
        assert!(run.value.contains("Requirements"));
        assert!(run.raw_response.is_none());
    }

    #[actix_web::test]
    async fn test_requirements_doc_uses_trimmed_text() {
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .returning(|role, _| {
                assert_eq!(role, ModelRole::Slow);
                Ok("\n\n# PRD\n\nBody text.\n\n".to_string())
            });

        let run = pipeline_with(client)
            .requirements_doc(PrdSource::Markup("<html></html>"), "make it simple")
            .await;
        assert_eq!(run.status, RunStatus::Succeeded);
        assert_eq!(run.value, "# PRD\n\nBody text.");
    }

    #[actix_web::test]
    async fn test_learning_content_level_count_enforced() {
        let mut client = MockModelClient::new();
        client.expect_complete().returning(|_, _| {
            Ok(r#"{"topic_id": "style_basic", "title": "T", "levels": [
                {"level": 1, "description": "one"},
                {"level": 2, "description": "two"}
            ]}"#
            .to_string())
        });

        let run = pipeline_with(client).learning_content(&topic()).await;
        assert_eq!(run.status, RunStatus::FellBack);
        assert!(run.value.has_complete_levels());
        assert_eq!(run.value.topic_id, "style_basic");
    }

    #[actix_web::test]
    async fn test_learning_content_success_with_fence() {
        let mut client = MockModelClient::new();
        client.expect_complete().returning(|_, _| {
            Ok("```json\n{\"topic_id\": \"style_basic\", \"title\": \"Styling\", \"levels\": [\
                {\"level\": 1, \"description\": \"a\"},\
                {\"level\": 2, \"description\": \"b\"},\
                {\"level\": 3, \"description\": \"c\"},\
                {\"level\": 4, \"description\": \"d\"}]}\n```"
                .to_string())
        });

        let run = pipeline_with(client).learning_content(&topic()).await;
        assert_eq!(run.status, RunStatus::Succeeded);
        assert_eq!(run.value.title, "Styling");
    }

    #[actix_web::test]
    async fn test_test_task_schema_mismatch_falls_back() {
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .returning(|_, _| Ok(r#"{"title": "missing required fields"}"#.to_string()));

        let run = pipeline_with(client).test_task(&topic(), None).await;
        assert_eq!(run.status, RunStatus::FellBack);
        assert_eq!(run.value.topic_id, "style_basic");
        assert_eq!(run.value.checkpoints.len(), 1);
    }

    #[actix_web::test]
    async fn test_demo_site_extracts_files_and_summary() {
        let mut client = MockModelClient::new();
        client.expect_complete().returning(|role, _| {
            assert_eq!(role, ModelRole::Executor);
            Ok("\
```html filename=public/index.html
<html><body>demo</body></html>
```

```json
{\"files\": [\"public/index.html\"], \"features\": [\"hero\"], \"technology_used\": [\"HTML\"], \"theme\": \"light\"}
```
"
            .to_string())
        });

        let run = pipeline_with(client).demo_site("prd", "{}", "").await;
        assert_eq!(run.status, RunStatus::Succeeded);
        assert_eq!(
            run.value.files["public/index.html"],
            "<html><body>demo</body></html>"
        );
        let metadata = run.value.metadata.unwrap();
        assert_eq!(metadata.theme.as_deref(), Some("light"));
        assert_eq!(metadata.features, vec!["hero"]);
    }

    #[actix_web::test]
    async fn test_demo_site_without_blocks_falls_back() {
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .returning(|_, _| Ok("I cannot produce files today.".to_string()));

        let run = pipeline_with(client).demo_site("prd", "{}", "").await;
        assert_eq!(run.status, RunStatus::FellBack);
        assert!(run.value.files.contains_key("public/index.html"));
    }

    #[actix_web::test]
    async fn test_empty_response_falls_back() {
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .returning(|_, _| Ok("   \n  ".to_string()));

        let run = pipeline_with(client)
            .knowledge_graph(KnowledgeSource::Url("https://example.com"))
            .await;
        assert_eq!(run.status, RunStatus::FellBack);
    }
}
