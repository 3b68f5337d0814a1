use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{app_state::AppState, errors::AppError, models::dto::request::UploadMarkupRequest};

#[post("/api/upload/html")]
async fn upload_html(
    state: web::Data<Arc<AppState>>,
    request: web::Json<UploadMarkupRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let response = state.upload_service.handle_upload(&request).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/upload/list")]
async fn list_uploads(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let response = state.upload_service.list().await?;
    Ok(HttpResponse::Ok().json(response))
}
