pub mod file_store;
pub mod knowledge_repository;
pub mod prd_repository;
pub mod task_repository;

pub use knowledge_repository::{FileKnowledgeRepository, KnowledgeRepository};
pub use prd_repository::{FilePrdRepository, PrdRepository};
pub use task_repository::{FileTaskRepository, TaskRepository};
