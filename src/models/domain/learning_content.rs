use serde::{Deserialize, Serialize};

pub const LEVEL_COUNT: usize = 4;

/// Teaching material for one topic, always four levels deep: concept,
/// applied usage, mechanism, and a hands-on exercise.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LearningContent {
    pub topic_id: String,
    pub title: String,
    pub levels: Vec<LearningLevel>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LearningLevel {
    pub level: u8,
    pub description: String,
}

impl LearningContent {
    /// Schema check applied to model output: exactly four levels numbered
    /// 1 through 4 in order.
    pub fn has_complete_levels(&self) -> bool {
        self.levels.len() == LEVEL_COUNT
            && self
                .levels
                .iter()
                .enumerate()
                .all(|(i, l)| l.level as usize == i + 1)
    }
}

/// Normalized topic selection coming from the graph front end.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TopicInfo {
    pub topic_id: String,
    pub label: String,
    pub node_type: String,
    pub select_element: Vec<String>,
}
