use actix_web::web;

use crate::{handlers::root_handler, middleware::Authenticate};

pub mod auth_routes;
pub mod snippet_routes;
pub mod user_routes;

pub fn config(config: &mut web::ServiceConfig, auth: Authenticate) {
    config.service(
        web::resource("/")
            .name("api-root")
            .route(web::get().to(root_handler::api_root))
            .route(web::head().to(root_handler::api_root))
            .route(root_handler::options("Api Root", "GET, HEAD, OPTIONS"))
            .default_service(web::to(root_handler::method_not_allowed)),
    );
    snippet_routes::config(config, auth.clone());
    user_routes::config(config, auth);
    auth_routes::config(config);
}
