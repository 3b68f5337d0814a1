use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::{FileKnowledgeRepository, FilePrdRepository, FileTaskRepository},
    services::{
        ExecutorService, GenerationPipeline, KnowledgeService, LearningService, ModelClient,
        OpenAiModelClient, PrdService, TestTaskService, UploadService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub prd_service: Arc<PrdService>,
    pub knowledge_service: Arc<KnowledgeService>,
    pub executor_service: Arc<ExecutorService>,
    pub learning_service: Arc<LearningService>,
    pub test_service: Arc<TestTaskService>,
    pub upload_service: Arc<UploadService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let config = Arc::new(config);

        let client: Arc<dyn ModelClient> = Arc::new(OpenAiModelClient::new(config.clone()));
        let pipeline = Arc::new(GenerationPipeline::new(client, config.use_mock));

        let prd_repository = Arc::new(FilePrdRepository::new(&config.data_dir));
        prd_repository.ensure_dirs().await?;
        let prd_service = Arc::new(PrdService::new(pipeline.clone(), prd_repository));

        let knowledge_repository = Arc::new(FileKnowledgeRepository::new(&config.data_dir));
        knowledge_repository.ensure_dirs().await?;
        let knowledge_service = Arc::new(KnowledgeService::new(
            pipeline.clone(),
            knowledge_repository,
        ));

        let task_repository = Arc::new(FileTaskRepository::new(&config.data_dir));
        task_repository.ensure_dirs().await?;
        let executor_service = Arc::new(ExecutorService::new(pipeline.clone(), task_repository));

        let learning_service = Arc::new(LearningService::new(pipeline.clone()));
        let test_service = Arc::new(TestTaskService::new(pipeline));

        let upload_service = Arc::new(UploadService::new(&config.data_dir));
        upload_service.ensure_dirs().await?;

        Ok(Self {
            prd_service,
            knowledge_service,
            executor_service,
            learning_service,
            test_service,
            upload_service,
            config,
        })
    }
}
