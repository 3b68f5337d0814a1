use serde::{Deserialize, Serialize};

/// Interactive exercise generated for one topic. Checkpoints stay loose JSON
/// objects because the grading front end owns their vocabulary; this service
/// only transports them.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TestTask {
    pub topic_id: String,
    pub title: String,
    pub description_md: String,
    pub start_code: CodeBundle,
    #[serde(default)]
    pub checkpoints: Vec<serde_json::Value>,
    pub answer: CodeBundle,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CodeBundle {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
}
