use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::request::ExecuteTaskRequest};

#[post("/api/execute")]
async fn execute_task(
    state: web::Data<Arc<AppState>>,
    request: web::Json<ExecuteTaskRequest>,
) -> Result<HttpResponse, AppError> {
    if request.prd.content.trim().is_empty() {
        return Err(AppError::ValidationError("prd.content must not be empty".into()));
    }

    let response = state.executor_service.execute(&request).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/execute/status/{task_id}")]
async fn task_status(
    state: web::Data<Arc<AppState>>,
    task_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.executor_service.status(&task_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/execute/download/{task_id}")]
async fn download_task(
    state: web::Data<Arc<AppState>>,
    task_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let (filename, bytes) = state.executor_service.download(&task_id).await?;
    Ok(HttpResponse::Ok()
        .content_type("application/zip")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes))
}
