use std::sync::Arc;

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{ExtractKnowledgeRequest, SaveKnowledgeRequest},
    models::dto::response::MessageResponse,
};

#[post("/api/knowledge/extract")]
async fn extract_knowledge(
    state: web::Data<Arc<AppState>>,
    request: web::Json<ExtractKnowledgeRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let response = state.knowledge_service.extract(&request).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/knowledge/save")]
async fn save_knowledge(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SaveKnowledgeRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let response = state.knowledge_service.save(&request).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/api/knowledge")]
async fn list_knowledge(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let response = state.knowledge_service.list().await?;
    Ok(HttpResponse::Ok().json(response))
}

/// The working copy left behind by the most recent extraction.
#[get("/api/knowledge/current")]
async fn current_knowledge(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let graph = state.knowledge_service.current().await?;
    Ok(HttpResponse::Ok().json(graph))
}

#[get("/api/knowledge/download/{id}")]
async fn download_knowledge(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let (filename, bytes) = state.knowledge_service.download(&id).await?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes))
}

#[get("/api/knowledge/{id}")]
async fn get_knowledge(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let record = state.knowledge_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(record))
}

#[delete("/api/knowledge/{id}")]
async fn delete_knowledge(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.knowledge_service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("Knowledge graph '{}' deleted", id),
    }))
}
