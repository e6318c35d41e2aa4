use actix_web::{
    cookie::{time, Cookie, SameSite},
    web, HttpRequest, HttpResponse,
};
use serde::Deserialize;

use crate::{
    models::User,
    parsers,
    utils::auth::{decode_token, issue_token, verify_password},
    AppState,
};

const REFRESH_COOKIE: &str = "jwt";

fn refresh_cookie(value: String, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, value)
        .http_only(true)
        .same_site(SameSite::None)
        .secure(true)
        .max_age(max_age)
        .path("/")
        .finish()
}

#[derive(Debug, Deserialize)]
pub struct UserLoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let body: UserLoginRequest = match parsers::parse(&req, &body)
        .ok()
        .and_then(|value| serde_json::from_value(value).ok())
    {
        Some(body) => body,
        None => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "username and password are required" }));
        }
    };

    let user = match User::find_by_username(&app_state.db, &body.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            log::info!("login failed for unknown user {:?}", body.username);
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Invalid credentials" }));
        }
        Err(e) => {
            log::error!("login lookup failed: {e}");
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "DB query error" }));
        }
    };

    if !verify_password(&body.password, &user.password_hash) {
        log::info!("login failed for {}", user.username);
        return HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Invalid credentials" }));
    }

    let settings = &app_state.settings;

    let access_token = match issue_token(user.id, &settings.jwt_access_secret, settings.access_token_ttl) {
        Ok(token) => token,
        Err(e) => {
            log::error!("access token creation failed: {e}");
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Access token creation failed" }));
        }
    };

    let refresh_token = match issue_token(user.id, &settings.jwt_refresh_secret, settings.refresh_token_ttl) {
        Ok(token) => token,
        Err(e) => {
            log::error!("refresh token creation failed: {e}");
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Refresh token creation failed" }));
        }
    };

    let max_age = time::Duration::seconds(settings.refresh_token_ttl.num_seconds());

    HttpResponse::Ok()
        .cookie(refresh_cookie(refresh_token, max_age))
        .json(serde_json::json!({ "accessToken": access_token, "error": null }))
}

pub async fn logout() -> HttpResponse {
    let mut clear_jwt = refresh_cookie(String::new(), time::Duration::ZERO);
    clear_jwt.make_removal();

    HttpResponse::Ok()
        .cookie(clear_jwt)
        .json(serde_json::json!({ "error": null }))
}

pub async fn refresh(
    app_state: web::Data<AppState>,
    req: HttpRequest,
) -> HttpResponse {
    let refresh_token = if let Some(c) = req.cookie(REFRESH_COOKIE) {
        c.value().to_string()
    } else {
        return HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "No refresh token cookie" }));
    };

    let settings = &app_state.settings;

    let claims = match decode_token(&refresh_token, &settings.jwt_refresh_secret) {
        Ok(claims) => claims,
        Err(_) => {
            return HttpResponse::Forbidden()
                .json(serde_json::json!({ "error": "Invalid refresh token JWT" }));
        }
    };

    let user = match User::find(&app_state.db, claims.user.id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "User no longer exists" }));
        }
        Err(e) => {
            log::error!("refresh lookup failed: {e}");
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "DB error fetching user data" }));
        }
    };

    let access_token = match issue_token(user.id, &settings.jwt_access_secret, settings.access_token_ttl) {
        Ok(tok) => tok,
        Err(_) => {
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Failed to create access token" }));
        }
    };

    HttpResponse::Ok().json(serde_json::json!({
        "accessToken": access_token,
        "user": {
            "id": user.id,
            "username": user.username,
        },
        "error": null
    }))
}
