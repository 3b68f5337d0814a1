//! Deterministic stand-in artifacts used when a model call fails or when the
//! process runs in mock mode. One builder per generation task; each result is
//! fixed for a given input so tests and offline demos behave the same way on
//! every run.

use indexmap::IndexMap;
use serde_json::json;

use crate::models::domain::{
    CodeBundle, KnowledgeEdge, KnowledgeEdgeData, KnowledgeGraph, KnowledgeNode,
    KnowledgeNodeData, LearningContent, LearningLevel, SiteMetadata, TestTask, TopicInfo,
};

pub fn requirements_doc() -> String {
    "\
# Product Requirements Document (offline draft)

## Overview
A single-page teaching site that mirrors the layout of the reference page:
a header, one main content column, and a narrow sidebar.

## Visual & Style
Neutral palette (background #ffffff, text #1f2933, accent #2563eb),
system font stack, 8px spacing rhythm.

## Layout & Structure
Flexbox page shell; the main column takes roughly 70% of the width and the
sidebar the remaining 30%. Content is grouped into titled sections.

## Content Strategy
Each section pairs a short explanatory paragraph with one concrete example
element that the learner can inspect.

## Component Inventory
Header with site title, section headings, text paragraphs, an image
placeholder block, and a styled link list in the sidebar.
"
    .to_string()
}

fn node(id: &str, label: &str) -> KnowledgeNode {
    KnowledgeNode {
        data: KnowledgeNodeData {
            id: id.to_string(),
            label: label.to_string(),
            category: Some("media-block".to_string()),
            placement_hint: Some("main-content".to_string()),
            select_element: None,
        },
    }
}

/// The built-in topic graph: three nodes covering page structure, text
/// elements, and base styling, chained in teaching order.
pub fn knowledge_graph() -> KnowledgeGraph {
    KnowledgeGraph {
        nodes: vec![
            node("chapter1", "Module 1: Text and page structure basics"),
            node("text_paragraph", "Headings and paragraphs with h1-h6 and p"),
            node("style_basic", "Base colors and fonts with CSS"),
        ],
        edges: Some(vec![
            KnowledgeEdge {
                data: KnowledgeEdgeData {
                    id: None,
                    source: "chapter1".to_string(),
                    target: "text_paragraph".to_string(),
                },
            },
            KnowledgeEdge {
                data: KnowledgeEdgeData {
                    id: None,
                    source: "text_paragraph".to_string(),
                    target: "style_basic".to_string(),
                },
            },
        ]),
        dependent_edges: None,
    }
}

pub fn learning_content(topic: &TopicInfo) -> LearningContent {
    let label = &topic.label;
    LearningContent {
        topic_id: topic.topic_id.clone(),
        title: format!("Learning guide: {}", label),
        levels: vec![
            LearningLevel {
                level: 1,
                description: format!(
                    "{} introduces a core building block of a web page. Start by \
                     recognizing where it appears on pages you already know.",
                    label
                ),
            },
            LearningLevel {
                level: 2,
                description: format!(
                    "Write a minimal example of {} by hand and change one attribute \
                     or property at a time to see its effect.",
                    label
                ),
            },
            LearningLevel {
                level: 3,
                description: format!(
                    "Understand how the browser lays out and renders {} and how it \
                     interacts with surrounding elements.",
                    label
                ),
            },
            LearningLevel {
                level: 4,
                description: format!(
                    "Rebuild the matching part of the reference page using {} \
                     without looking at the sample code.",
                    label
                ),
            },
        ],
    }
}

pub fn test_task(topic: &TopicInfo) -> TestTask {
    TestTask {
        topic_id: topic.topic_id.clone(),
        title: format!("Exercise: {}", topic.label),
        description_md: "# Task\n\n## Step one\n\nUse the element this topic covers to add \
                         a visible block to the page."
            .to_string(),
        start_code: CodeBundle {
            html: "<!-- write your markup here -->".to_string(),
            css: String::new(),
            js: String::new(),
        },
        checkpoints: vec![json!({
            "name": "element present",
            "type": "assert_element",
            "selector": "div",
            "assertion_type": "exists",
            "feedback": "Add a div element to the page."
        })],
        answer: CodeBundle {
            html: "<div>example content</div>".to_string(),
            css: String::new(),
            js: String::new(),
        },
    }
}

const FALLBACK_INDEX_PAGE: &str = "\
<!DOCTYPE html>
<html lang=\"en\">
<head>
  <meta charset=\"utf-8\">
  <title>Demo site placeholder</title>
  <style>
    body { font-family: sans-serif; margin: 0; }
    .shell { display: flex; gap: 16px; padding: 24px; }
    main { flex: 7; }
    aside { flex: 3; background: #f3f4f6; padding: 16px; }
  </style>
</head>
<body>
  <header><h1>Demo site placeholder</h1></header>
  <div class=\"shell\">
    <main id=\"chapter1_main\">
      <p id=\"text_paragraph_sample\">This page was produced by the offline
      fallback because no model output was available.</p>
    </main>
    <aside id=\"style_basic_sidebar\"><p>Sidebar</p></aside>
  </div>
</body>
</html>
";

pub fn demo_site() -> (IndexMap<String, String>, SiteMetadata) {
    let mut files = IndexMap::new();
    files.insert(
        "public/index.html".to_string(),
        FALLBACK_INDEX_PAGE.to_string(),
    );
    let metadata = SiteMetadata {
        files: vec!["public/index.html".to_string()],
        features: vec!["static placeholder page".to_string()],
        technology_used: vec!["HTML".to_string(), "CSS".to_string()],
        theme: Some("neutral".to_string()),
    };
    (files, metadata)
}
