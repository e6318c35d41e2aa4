use actix_web::web;

use crate::{
    handlers::{root_handler, user_handler},
    middleware::Authenticate,
};

pub fn config(config: &mut web::ServiceConfig, auth: Authenticate) {
    config
        .service(
            web::resource(["/users/", "/users", "/users.json"])
                .name("user-list")
                .route(web::get().to(user_handler::list_users))
                .route(web::head().to(user_handler::list_users))
                .route(root_handler::options("User List", "GET, HEAD, OPTIONS"))
                .default_service(web::to(root_handler::method_not_allowed))
                .wrap(auth.clone()),
        )
        .service(
            web::resource([r"/users/{pk:\d+}/", r"/users/{pk:\d+}", r"/users/{pk:\d+}.json"])
                .name("user-detail")
                .route(web::get().to(user_handler::retrieve_user))
                .route(web::head().to(user_handler::retrieve_user))
                .route(root_handler::options("User Instance", "GET, HEAD, OPTIONS"))
                .default_service(web::to(root_handler::method_not_allowed))
                .wrap(auth),
        );
}
