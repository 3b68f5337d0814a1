pub mod executor_service;
pub mod extractors;
pub mod fallbacks;
pub mod generation_pipeline;
pub mod knowledge_service;
pub mod learning_service;
pub mod model_service;
pub mod prd_service;
pub mod sanitizer;
pub mod test_task_service;
pub mod upload_service;

pub use executor_service::ExecutorService;
pub use generation_pipeline::GenerationPipeline;
pub use knowledge_service::KnowledgeService;
pub use learning_service::LearningService;
pub use model_service::{ModelClient, OpenAiModelClient};
pub use prd_service::PrdService;
pub use test_task_service::TestTaskService;
pub use upload_service::UploadService;
