use std::sync::Arc;

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{GeneratePrdRequest, SavePrdRequest},
    models::dto::response::MessageResponse,
};

#[post("/api/prd/generate")]
async fn generate_prd(
    state: web::Data<Arc<AppState>>,
    request: web::Json<GeneratePrdRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let response = state.prd_service.generate(&request).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/prd/save")]
async fn save_prd(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SavePrdRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let response = state.prd_service.save(&request).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/api/prd")]
async fn list_prds(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let response = state.prd_service.list().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/prd/download/{id}")]
async fn download_prd(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let (filename, bytes) = state.prd_service.download(&id).await?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes))
}

#[get("/api/prd/{id}")]
async fn get_prd(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let record = state.prd_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(record))
}

#[delete("/api/prd/{id}")]
async fn delete_prd(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.prd_service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("PRD '{}' deleted", id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_generate_prd_in_mock_mode_falls_back() {
        let (state, _dir) = test_utils::mock_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_prd),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/prd/generate")
            .set_json(serde_json::json!({"reference_url": "https://example.com"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "fallback");
        assert!(body["prd_text"].as_str().unwrap().contains("#"));
    }

    #[actix_web::test]
    async fn test_generate_prd_requires_a_reference() {
        let (state, _dir) = test_utils::mock_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_prd),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/prd/generate")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_save_then_get_round_trip() {
        let (state, _dir) = test_utils::mock_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(save_prd)
                .service(get_prd),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/prd/save")
            .set_json(serde_json::json!({"title": "Landing page", "content": "# PRD"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let saved: serde_json::Value = test::read_body_json(resp).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/prd/{}", saved["id"].as_str().unwrap()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let record: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(record["title"], "Landing page");
    }

    #[actix_web::test]
    async fn test_get_unknown_prd_is_404() {
        let (state, _dir) = test_utils::mock_state().await;
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(get_prd),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/prd/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
