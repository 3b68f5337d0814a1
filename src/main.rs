use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use webwright_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if !config.has_api_key() && !config.use_mock {
        log::warn!("API_KEY is not set; every generation will fall back to built-in content");
    }
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = Arc::new(
        AppState::new(config)
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?,
    );

    log::info!("Starting server on {}:{}", host, port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .expose_headers([header::CONTENT_DISPOSITION]);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
