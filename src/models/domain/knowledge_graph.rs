use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Topic graph extracted from a reference page. The nested `data` wrapper on
/// nodes and edges matches the wire format the graph rendering layer expects,
/// so it is preserved verbatim through persistence.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct KnowledgeGraph {
    pub nodes: Vec<KnowledgeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<KnowledgeEdge>>,
    #[serde(
        default,
        rename = "dependentEdges",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependent_edges: Option<Vec<KnowledgeEdge>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct KnowledgeNode {
    pub data: KnowledgeNodeData,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct KnowledgeNodeData {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        rename = "placementHint",
        skip_serializing_if = "Option::is_none"
    )]
    pub placement_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_element: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct KnowledgeEdge {
    pub data: KnowledgeEdgeData,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct KnowledgeEdgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

impl KnowledgeGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Edge endpoints that reference no node in the graph. Dangling
    /// references are tolerated at import time; callers log them.
    pub fn dangling_edge_references(&self) -> Vec<String> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.data.id.as_str()).collect();
        let mut dangling = Vec::new();
        let all_edges = self
            .edges
            .iter()
            .flatten()
            .chain(self.dependent_edges.iter().flatten());
        for edge in all_edges {
            for endpoint in [&edge.data.source, &edge.data.target] {
                if !ids.contains(endpoint.as_str()) {
                    dangling.push(endpoint.clone());
                }
            }
        }
        dangling
    }
}

/// Saved graph record, one JSON file per id.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct KnowledgeRecord {
    pub id: String,
    pub name: String,
    pub graph: KnowledgeGraph,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct KnowledgeSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&KnowledgeRecord> for KnowledgeSummary {
    fn from(record: &KnowledgeRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> KnowledgeNode {
        KnowledgeNode {
            data: KnowledgeNodeData {
                id: id.to_string(),
                label: format!("label for {}", id),
                category: None,
                placement_hint: None,
                select_element: None,
            },
        }
    }

    fn edge(source: &str, target: &str) -> KnowledgeEdge {
        KnowledgeEdge {
            data: KnowledgeEdgeData {
                id: None,
                source: source.to_string(),
                target: target.to_string(),
            },
        }
    }

    #[test]
    fn test_dangling_edge_references() {
        let graph = KnowledgeGraph {
            nodes: vec![node("a"), node("b")],
            edges: Some(vec![edge("a", "b"), edge("a", "missing")]),
            dependent_edges: Some(vec![edge("ghost", "b")]),
        };

        let dangling = graph.dangling_edge_references();
        assert_eq!(dangling, vec!["missing".to_string(), "ghost".to_string()]);
    }

    #[test]
    fn test_no_dangling_references_in_connected_graph() {
        let graph = KnowledgeGraph {
            nodes: vec![node("a"), node("b")],
            edges: Some(vec![edge("a", "b")]),
            dependent_edges: None,
        };

        assert!(graph.dangling_edge_references().is_empty());
    }

    #[test]
    fn test_deserializes_wire_format() {
        let raw = r#"{
            "nodes": [
                {"data": {"id": "n1", "label": "Node", "category": "media-block", "placementHint": "main-content"}}
            ],
            "dependentEdges": [
                {"data": {"source": "n1", "target": "n1"}}
            ]
        }"#;

        let graph: KnowledgeGraph = serde_json::from_str(raw).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.nodes[0].data.placement_hint.as_deref(), Some("main-content"));
        assert!(graph.dependent_edges.is_some());

        let round = serde_json::to_value(&graph).unwrap();
        assert_eq!(round["nodes"][0]["data"]["placementHint"], "main-content");
        assert!(round["dependentEdges"].is_array());
    }
}
