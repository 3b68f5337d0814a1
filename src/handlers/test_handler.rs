use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState, errors::AppError, models::dto::request::GenerateTestTaskRequest,
};

#[post("/api/test/generate-test-task")]
async fn generate_test_task(
    state: web::Data<Arc<AppState>>,
    request: web::Json<GenerateTestTaskRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let task = state.test_service.generate(&request).await;
    Ok(HttpResponse::Ok().json(task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_generate_task_has_checkpoints_and_answer() {
        let (state, _dir) = test_utils::mock_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_test_task),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/test/generate-test-task")
            .set_json(serde_json::json!({
                "topic_id": "style_basic",
                "knowledge_node": {
                    "data": {"id": "style_basic", "label": "Base styles", "category": "style"}
                }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["topic_id"], "style_basic");
        assert!(!body["checkpoints"].as_array().unwrap().is_empty());
        assert!(body["answer"].is_object());
    }

    #[actix_web::test]
    async fn test_generate_task_requires_topic_id() {
        let (state, _dir) = test_utils::mock_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_test_task),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/test/generate-test-task")
            .set_json(serde_json::json!({"topic_id": "", "knowledge_node": {}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
