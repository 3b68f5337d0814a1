use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState, errors::AppError, models::dto::request::GenerateKnowledgePointRequest,
};

#[post("/api/learning/generate-knowledge-point")]
async fn generate_knowledge_point(
    state: web::Data<Arc<AppState>>,
    request: web::Json<GenerateKnowledgePointRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let content = state.learning_service.generate(&request).await;
    Ok(HttpResponse::Ok().json(content))
}
