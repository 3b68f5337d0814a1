//! Contract tests for the file-backed record stores: append-once saves,
//! `None` for unknown ids, snapshot listing that tolerates junk, and
//! working-copy round trips.

use chrono::{Duration, Utc};
use indexmap::IndexMap;

use webwright_server::{
    errors::AppError,
    models::domain::{
        KnowledgeGraph, KnowledgeNode, KnowledgeNodeData, KnowledgeRecord, PrdRecord, TaskRecord,
    },
    repositories::{
        FileKnowledgeRepository, FilePrdRepository, FileTaskRepository, KnowledgeRepository,
        PrdRepository, TaskRepository,
    },
};

fn prd(id: &str, minutes_ago: i64) -> PrdRecord {
    PrdRecord {
        id: id.to_string(),
        title: format!("PRD {}", id),
        content: "# Heading\n\nBody.".to_string(),
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

fn small_graph() -> KnowledgeGraph {
    KnowledgeGraph {
        nodes: vec![KnowledgeNode {
            data: KnowledgeNodeData {
                id: "only_node".to_string(),
                label: "Only node".to_string(),
                category: None,
                placement_hint: Some("main-content".to_string()),
                select_element: None,
            },
        }],
        edges: None,
        dependent_edges: None,
    }
}

fn task(id: &str, files: &[(&str, &str)]) -> TaskRecord {
    let mut map = IndexMap::new();
    for (path, body) in files {
        map.insert(path.to_string(), body.to_string());
    }
    TaskRecord::new(
        id.to_string(),
        "success",
        "done".to_string(),
        map,
        None,
        String::new(),
    )
}

#[actix_web::test]
async fn test_prd_save_then_find_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FilePrdRepository::new(dir.path());
    repo.ensure_dirs().await.unwrap();

    repo.save(prd("a1", 0)).await.unwrap();

    let found = repo.find_by_id("a1").await.unwrap().unwrap();
    assert_eq!(found.title, "PRD a1");
    assert_eq!(found.content, "# Heading\n\nBody.");
}

#[actix_web::test]
async fn test_find_unknown_id_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FilePrdRepository::new(dir.path());
    repo.ensure_dirs().await.unwrap();

    assert!(repo.find_by_id("missing").await.unwrap().is_none());
    assert!(repo.find_by_id("../../etc/passwd").await.unwrap().is_none());
}

#[actix_web::test]
async fn test_save_is_append_once() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FilePrdRepository::new(dir.path());
    repo.ensure_dirs().await.unwrap();

    repo.save(prd("dup", 0)).await.unwrap();
    let second = repo.save(prd("dup", 0)).await;
    assert!(matches!(second, Err(AppError::AlreadyExists(_))));
}

#[actix_web::test]
async fn test_delete_then_find_is_none_and_second_delete_is_false() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FilePrdRepository::new(dir.path());
    repo.ensure_dirs().await.unwrap();

    repo.save(prd("gone", 0)).await.unwrap();
    assert!(repo.delete("gone").await.unwrap());
    assert!(repo.find_by_id("gone").await.unwrap().is_none());
    assert!(!repo.delete("gone").await.unwrap());
}

#[actix_web::test]
async fn test_list_is_newest_first_and_skips_junk() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FilePrdRepository::new(dir.path());
    repo.ensure_dirs().await.unwrap();

    repo.save(prd("old", 30)).await.unwrap();
    repo.save(prd("new", 1)).await.unwrap();
    repo.save(prd("mid", 10)).await.unwrap();

    // A concurrent writer's half-finished record must not break the scan.
    tokio::fs::write(
        dir.path().join("prd").join("records").join("junk.json"),
        b"{definitely not a record",
    )
    .await
    .unwrap();

    let records = repo.list().await.unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[actix_web::test]
async fn test_prd_working_copy_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FilePrdRepository::new(dir.path());
    repo.ensure_dirs().await.unwrap();

    assert!(repo.load_working_copy().await.unwrap().is_none());

    repo.save_working_copy("# Draft\n\nFirst pass.").await.unwrap();
    assert_eq!(
        repo.load_working_copy().await.unwrap().as_deref(),
        Some("# Draft\n\nFirst pass.")
    );

    repo.save_working_copy("# Draft v2").await.unwrap();
    assert_eq!(
        repo.load_working_copy().await.unwrap().as_deref(),
        Some("# Draft v2")
    );
}

#[actix_web::test]
async fn test_knowledge_record_and_working_copy() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileKnowledgeRepository::new(dir.path());
    repo.ensure_dirs().await.unwrap();

    assert!(repo.load_working_copy().await.unwrap().is_none());
    repo.save_working_copy(&small_graph()).await.unwrap();
    let loaded = repo.load_working_copy().await.unwrap().unwrap();
    assert_eq!(loaded.nodes.len(), 1);
    assert_eq!(loaded.nodes[0].data.id, "only_node");

    let record = KnowledgeRecord {
        id: "k1".to_string(),
        name: "basics".to_string(),
        graph: small_graph(),
        created_at: Utc::now(),
    };
    repo.save(record).await.unwrap();

    let found = repo.find_by_id("k1").await.unwrap().unwrap();
    assert_eq!(found.name, "basics");
    assert!(repo.delete("k1").await.unwrap());
    assert!(repo.find_by_id("k1").await.unwrap().is_none());
}

#[actix_web::test]
async fn test_task_save_materializes_site_tree() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileTaskRepository::new(dir.path());
    repo.ensure_dirs().await.unwrap();

    repo.save(task(
        "t1",
        &[
            ("public/index.html", "<html></html>"),
            ("public/css/style.css", "body {}"),
        ],
    ))
    .await
    .unwrap();

    let site = dir.path().join("tasks").join("sites").join("t1");
    assert_eq!(
        tokio::fs::read_to_string(site.join("public").join("index.html"))
            .await
            .unwrap(),
        "<html></html>"
    );
    assert!(site.join("public").join("css").join("style.css").is_file());

    assert!(repo.delete("t1").await.unwrap());
    assert!(!site.exists());
}

#[actix_web::test]
async fn test_task_with_traversal_path_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileTaskRepository::new(dir.path());
    repo.ensure_dirs().await.unwrap();

    let result = repo
        .save(task("evil", &[("../outside.html", "<html></html>")]))
        .await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert!(!dir.path().join("tasks").join("outside.html").exists());

    // The rejected task never became visible.
    assert!(repo.find_by_id("evil").await.unwrap().is_none());
}

#[actix_web::test]
async fn test_task_record_preserves_file_order_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileTaskRepository::new(dir.path());
    repo.ensure_dirs().await.unwrap();

    repo.save(task(
        "ordered",
        &[
            ("public/index.html", "a"),
            ("public/js/app.js", "b"),
            ("public/css/style.css", "c"),
        ],
    ))
    .await
    .unwrap();

    let found = repo.find_by_id("ordered").await.unwrap().unwrap();
    assert_eq!(
        found.files,
        vec!["public/index.html", "public/js/app.js", "public/css/style.css"]
    );
    assert_eq!(found.file_map.get("public/js/app.js").unwrap(), "b");
}
