use actix_web::web;

use crate::handlers::auth_handler;

pub fn config(config: &mut web::ServiceConfig) {
    config.service(
        web::scope("/api-auth")
            .route("/login/", web::post().to(auth_handler::login))
            .route("/logout/", web::post().to(auth_handler::logout))
            .route("/refresh/", web::post().to(auth_handler::refresh)),
    );
}
