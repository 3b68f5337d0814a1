use std::sync::Arc;

use actix_web::{delete, get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::response::MessageResponse};

#[get("/api/logs")]
async fn list_logs(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let response = state.executor_service.logs().await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Full task record, raw model response included.
#[get("/api/logs/{task_id}")]
async fn get_log(
    state: web::Data<Arc<AppState>>,
    task_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let record = state.executor_service.get(&task_id).await?;
    Ok(HttpResponse::Ok().json(record))
}

#[delete("/api/logs/{task_id}")]
async fn delete_log(
    state: web::Data<Arc<AppState>>,
    task_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.executor_service.delete(&task_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("Task '{}' deleted", task_id),
    }))
}
