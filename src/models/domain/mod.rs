pub mod knowledge_graph;
pub mod learning_content;
pub mod prd;
pub mod task_record;
pub mod test_task;

pub use knowledge_graph::{
    KnowledgeEdge, KnowledgeEdgeData, KnowledgeGraph, KnowledgeNode, KnowledgeNodeData,
    KnowledgeRecord, KnowledgeSummary,
};
pub use learning_content::{LearningContent, LearningLevel, TopicInfo};
pub use prd::{PrdRecord, PrdSummary};
pub use task_record::{
    SiteMetadata, TaskRecord, TaskSummary, TASK_STATUS_FALLBACK, TASK_STATUS_SUCCESS,
};
pub use test_task::{CodeBundle, TestTask};
