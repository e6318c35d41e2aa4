//! Absolute hyperlinks, built from the scheme and host of the current request.
//!
//! A request made with a format suffix (`/snippets/1.json`) gets links carrying
//! the same suffix. The highlight link is always `.html` in that case.

use actix_web::HttpRequest;

pub fn absolute(req: &HttpRequest, path: &str) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), path)
}

/// The format suffix of the request path, if any.
pub fn format_suffix(req: &HttpRequest) -> Option<&'static str> {
    req.path().ends_with(".json").then_some("json")
}

// `path` has no trailing slash; one is added unless a suffix applies.
fn link(req: &HttpRequest, path: &str) -> String {
    match format_suffix(req) {
        Some(format) => absolute(req, &format!("{path}.{format}")),
        None => absolute(req, &format!("{path}/")),
    }
}

pub fn snippet_list(req: &HttpRequest) -> String {
    link(req, "/snippets")
}

pub fn snippet_detail(req: &HttpRequest, id: i64) -> String {
    link(req, &format!("/snippets/{id}"))
}

pub fn snippet_highlight(req: &HttpRequest, id: i64) -> String {
    match format_suffix(req) {
        Some(_) => absolute(req, &format!("/snippets/{id}/highlight.html")),
        None => absolute(req, &format!("/snippets/{id}/highlight/")),
    }
}

pub fn user_list(req: &HttpRequest) -> String {
    link(req, "/users")
}

pub fn user_detail(req: &HttpRequest, id: i64) -> String {
    link(req, &format!("/users/{id}"))
}
