use actix_web::{
    http::{header, Method},
    web, HttpRequest, HttpResponse, Route,
};

use crate::{error::ApiError, utils::urls};

/// Entry point listing the top-level collections.
pub async fn api_root(req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "users": urls::user_list(&req),
        "snippets": urls::snippet_list(&req),
    }))
}

pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed(req.method().to_string()))
}

/// An OPTIONS route describing a resource: its methods in `Allow`, and what
/// it renders and parses in the body.
pub fn options(name: &'static str, allow: &'static str) -> Route {
    web::method(Method::OPTIONS).to(move || async move {
        HttpResponse::Ok()
            .insert_header((header::ALLOW, allow))
            .json(serde_json::json!({
                "name": name,
                "renders": ["application/json"],
                "parses": ["application/json", "application/x-www-form-urlencoded"],
            }))
    })
}
