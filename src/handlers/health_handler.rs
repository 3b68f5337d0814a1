use actix_web::{get, HttpResponse};

#[get("/")]
async fn index_banner() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "WebWright server is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
