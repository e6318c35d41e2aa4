use actix_web::web;

use crate::{
    handlers::{root_handler, snippet_handler},
    middleware::Authenticate,
};

pub fn config(config: &mut web::ServiceConfig, auth: Authenticate) {
    config
        .service(
            web::resource(["/snippets/", "/snippets", "/snippets.json"])
                .name("snippet-list")
                .route(web::get().to(snippet_handler::list_snippets))
                .route(web::head().to(snippet_handler::list_snippets))
                .route(web::post().to(snippet_handler::create_snippet))
                .route(root_handler::options("Snippet List", "GET, POST, HEAD, OPTIONS"))
                .default_service(web::to(root_handler::method_not_allowed))
                .wrap(auth.clone()),
        )
        .service(
            web::resource([
                r"/snippets/{pk:\d+}/",
                r"/snippets/{pk:\d+}",
                r"/snippets/{pk:\d+}.json",
            ])
            .name("snippet-detail")
            .route(web::get().to(snippet_handler::retrieve_snippet))
            .route(web::head().to(snippet_handler::retrieve_snippet))
            .route(web::put().to(snippet_handler::update_snippet))
            .route(web::patch().to(snippet_handler::partial_update_snippet))
            .route(web::delete().to(snippet_handler::destroy_snippet))
            .route(root_handler::options(
                "Snippet Instance",
                "GET, PUT, PATCH, DELETE, HEAD, OPTIONS",
            ))
            .default_service(web::to(root_handler::method_not_allowed))
            .wrap(auth.clone()),
        )
        .service(
            web::resource([
                r"/snippets/{pk:\d+}/highlight/",
                r"/snippets/{pk:\d+}/highlight",
                r"/snippets/{pk:\d+}/highlight.html",
            ])
            .name("snippet-highlight")
            .route(web::get().to(snippet_handler::highlight_snippet))
            .route(web::head().to(snippet_handler::highlight_snippet))
            .route(root_handler::options("Snippet Highlight", "GET, HEAD, OPTIONS"))
            .default_service(web::to(root_handler::method_not_allowed))
            .wrap(auth),
        );
}
