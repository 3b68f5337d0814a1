use std::sync::Arc;

use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError};

/// A single artifact file, typed by extension. The tail match lets
/// nested paths like `public/css/style.css` through as one parameter.
#[get("/api/preview/file/{task_id}/{path:.*}")]
async fn preview_file(
    state: web::Data<Arc<AppState>>,
    params: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (task_id, path) = params.into_inner();
    let (content_type, body) = state.executor_service.preview_file(&task_id, &path).await?;
    Ok(HttpResponse::Ok().content_type(content_type).body(body))
}

#[get("/api/preview/{task_id}")]
async fn preview_page(
    state: web::Data<Arc<AppState>>,
    task_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let page = state.executor_service.preview_page(&task_id).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page))
}
