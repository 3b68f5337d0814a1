use actix_web::web;

pub mod executor_handler;
pub mod health_handler;
pub mod knowledge_handler;
pub mod learning_handler;
pub mod logs_handler;
pub mod prd_handler;
pub mod preview_handler;
pub mod test_handler;
pub mod upload_handler;

/// Registers every route. Literal paths go in before their sibling
/// `{id}` routes so `current` and `download` are not captured as ids.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_handler::index_banner)
        .service(health_handler::health_check)
        .service(prd_handler::generate_prd)
        .service(prd_handler::save_prd)
        .service(prd_handler::list_prds)
        .service(prd_handler::download_prd)
        .service(prd_handler::get_prd)
        .service(prd_handler::delete_prd)
        .service(knowledge_handler::extract_knowledge)
        .service(knowledge_handler::save_knowledge)
        .service(knowledge_handler::list_knowledge)
        .service(knowledge_handler::current_knowledge)
        .service(knowledge_handler::download_knowledge)
        .service(knowledge_handler::get_knowledge)
        .service(knowledge_handler::delete_knowledge)
        .service(executor_handler::execute_task)
        .service(executor_handler::task_status)
        .service(executor_handler::download_task)
        .service(learning_handler::generate_knowledge_point)
        .service(test_handler::generate_test_task)
        .service(upload_handler::upload_html)
        .service(upload_handler::list_uploads)
        .service(preview_handler::preview_file)
        .service(preview_handler::preview_page)
        .service(logs_handler::list_logs)
        .service(logs_handler::get_log)
        .service(logs_handler::delete_log);
}
