//! Prompt builders, one per generation task. Keep the output contracts in
//! sync with the extractors: JSON tasks must answer with a single JSON
//! object, the site task with annotated file blocks plus a summary block.

use crate::models::domain::TopicInfo;
use crate::models::dto::request::ReferenceInfo;

pub const LEARNING_MENTOR_SYSTEM_PROMPT: &str = "You are a professional front-end development mentor. You explain one topic at a time, always in four levels that build on each other, and you answer with a single JSON object and nothing else.";

pub const TEST_AUTHOR_SYSTEM_PROMPT: &str = "You are an experienced programming exam author for front-end courses. You design small, checkable exercises and you answer with a single JSON object and nothing else.";

pub const SITE_BUILDER_SYSTEM_PROMPT: &str = "You are a senior front-end engineer. You build small, self-contained teaching websites with plain HTML, CSS and JavaScript, and you emit every file in the annotated code-block format you are given.";

pub fn website_analysis_prompt(reference_url: &str) -> String {
    format!(
        "You are a digital product manager and front-end architect. Analyze the website at the \
URL below and write a product requirements document for a teaching replica of it.

## TARGET

{reference_url}

## REQUIRED SECTIONS

1. Website Overview: purpose, audience, and the single job the page does best
2. Visual & Style: palette as hex values, typography, imagery and iconography
3. Layout & Structure: page shell, grid or flex systems, spacing rhythm, responsive behavior
4. Interaction Patterns: navigation, hover and focus states, forms, transitions
5. Content Strategy: tone, content types, and how text and media are paired
6. Technical Implementation Clues: frameworks, rendering strategy, notable libraries
7. Component Inventory: every distinct component with a one-line description
8. Example Page Blueprint: a top-to-bottom outline of one representative page
9. Risks & Considerations: anything hard to replicate and what to simplify

## OUTPUT RULES

- Write the document in Markdown with the section headings above
- Be concrete: name colors, sizes, and counts rather than describing them vaguely
- Do not include any commentary outside the document itself"
    )
}

pub fn prd_from_markup_prompt(markup: &str, user_goal: &str) -> String {
    let goal = if user_goal.trim().is_empty() {
        "a faithful teaching replica of the page"
    } else {
        user_goal
    };
    format!(
        "You are a digital product manager and front-end architect. The raw markup of a \
reference page is included below. Write a product requirements document for {goal}.

## REQUIRED SECTIONS

1. Website Overview
2. Visual & Style (hex colors, typography)
3. Layout & Structure
4. Interaction Patterns
5. Content Strategy
6. Component Inventory
7. Example Page Blueprint
8. Risks & Considerations

## OUTPUT RULES

- Write the document in Markdown with the section headings above
- Derive every claim from the markup; do not invent features the page does not have
- Do not include any commentary outside the document itself

## REFERENCE MARKUP

{markup}"
    )
}

const KNOWLEDGE_CONTRACT: &str = "\
## OUTPUT FORMAT

You MUST return a single JSON object of this exact shape. No prose, no
markdown fences, no extra keys, double quotes only:

{
  \"nodes\": [
    {
      \"data\": {
        \"id\": \"snake_case_english_id\",
        \"label\": \"short learner-facing topic name\",
        \"category\": \"media-block\",
        \"placementHint\": \"main-content\"
      }
    }
  ]
}

## RULES

1. Every id is English snake_case and unique
2. Every label names one concrete, teachable front-end skill
3. Order the nodes from basic to advanced so they read as a course outline
4. Use 3 to 10 nodes; prefer fewer, sharper topics over many vague ones
5. category describes the kind of page block the topic appears in;
   placementHint says where a demo of it belongs on the page";

pub fn knowledge_points_prompt(reference_url: &str) -> String {
    format!(
        "You are a front-end teaching expert. Identify the HTML and CSS topics a beginner must \
master to rebuild the website at this URL:

{reference_url}

{KNOWLEDGE_CONTRACT}"
    )
}

pub fn knowledge_points_from_info_prompt(info: &ReferenceInfo) -> String {
    let structure = serde_json::to_string(&info.structure).unwrap_or_else(|_| "[]".to_string());
    let text_blocks = info.text_blocks.join("\n- ");
    format!(
        "You are a front-end teaching expert. A reference page was analyzed into the outline \
below. Identify the HTML and CSS topics a beginner must master to rebuild it.

## PAGE TITLE

{title}

## PAGE STRUCTURE

{structure}

## TEXT BLOCKS

- {text_blocks}

{KNOWLEDGE_CONTRACT}",
        title = info.title,
    )
}

pub fn learning_content_prompt(topic: &TopicInfo) -> String {
    format!(
        "Write teaching content for one front-end topic.

## TOPIC

- id: {id}
- name: {label}
- kind: {kind}
- related elements: {elements}

## OUTPUT FORMAT

You MUST return a single JSON object of this exact shape, double quotes only:

{{
  \"topic_id\": \"{id}\",
  \"title\": \"learner-facing title\",
  \"levels\": [
    {{\"level\": 1, \"description\": \"...\"}},
    {{\"level\": 2, \"description\": \"...\"}},
    {{\"level\": 3, \"description\": \"...\"}},
    {{\"level\": 4, \"description\": \"...\"}}
  ]
}}

## LEVEL MEANINGS

1. Concept: what the topic is and where it appears on real pages
2. Usage: a minimal hands-on example and the attributes or properties that matter
3. Mechanism: how the browser treats it and how it interacts with neighbors
4. Practice: a short exercise the learner can complete in an editor

Exactly four levels, numbered 1 through 4, each description 2 to 4 sentences.",
        id = topic.topic_id,
        label = topic.label,
        kind = topic.node_type,
        elements = topic.select_element.join(", "),
    )
}

pub fn test_task_prompt(topic: &TopicInfo, learning_content: Option<&serde_json::Value>) -> String {
    let context = learning_content
        .map(|content| {
            format!(
                "\n## LEARNING CONTENT ALREADY SHOWN TO THE LEARNER\n\n{}\n",
                serde_json::to_string_pretty(content).unwrap_or_default()
            )
        })
        .unwrap_or_default();
    format!(
        "Design one small coding exercise for the front-end topic below.

## TOPIC

- id: {id}
- name: {label}
- related elements: {elements}
{context}
## OUTPUT FORMAT

You MUST return a single JSON object of this exact shape, double quotes only:

{{
  \"topic_id\": \"{id}\",
  \"title\": \"short task name\",
  \"description_md\": \"Markdown task description with numbered steps\",
  \"start_code\": {{\"html\": \"...\", \"css\": \"...\", \"js\": \"...\"}},
  \"checkpoints\": [
    {{
      \"name\": \"what is being checked\",
      \"type\": \"assert_element\",
      \"selector\": \"css selector\",
      \"assertion_type\": \"exists\",
      \"feedback\": \"hint shown when the check fails\"
    }}
  ],
  \"answer\": {{\"html\": \"...\", \"css\": \"...\", \"js\": \"...\"}}
}}

## RULES

1. The task must be solvable with the topic's elements alone
2. start_code compiles as-is and marks where the learner should type
3. Every checkpoint is automatically checkable against the learner's DOM
4. answer passes every checkpoint",
        id = topic.topic_id,
        label = topic.label,
        elements = topic.select_element.join(", "),
    )
}

pub fn demo_site_prompt(prd_text: &str, graph_json: &str, user_note: &str) -> String {
    let note = if user_note.trim().is_empty() {
        String::new()
    } else {
        format!("\n## USER NOTE\n\n{user_note}\n")
    };
    format!(
        "Build a single-page teaching demo website from the requirements document and the topic \
graph below.

## REQUIREMENTS DOCUMENT

{prd_text}

## TOPIC GRAPH

{graph_json}
{note}
## OUTPUT FORMAT

Emit every file as an annotated code block, then one JSON summary block:

```html filename=public/index.html
<!DOCTYPE html>
...
```

```json
{{\"files\": [\"public/index.html\"], \"features\": [\"...\"], \"technology_used\": [\"...\"], \"theme\": \"...\"}}
```

## RULES

1. Produce exactly one HTML file at public/index.html with its CSS and JavaScript inline
2. Native HTML, CSS and JavaScript only; no frameworks, no build steps, no external assets
3. Give each topic a visible component whose id is [topicId]_[componentType] and set
   data-topic=\"[topicId]\" on it
4. Page shell is a flex layout: main column about 70% wide, sidebar about 30%
5. Media blocks keep a fixed aspect ratio; galleries show three thumbnails; lists and
   forms are styled, with visible focus states on inputs
6. Leave one blank line between code blocks and never nest fenced blocks inside a file body
7. The summary block lists every emitted file and comes last"
    )
}
