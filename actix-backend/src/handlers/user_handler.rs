use actix_web::{web, HttpRequest, HttpResponse};

use crate::{
    error::ApiError,
    models::{Snippet, User},
    pagination::{Page, PageParams, PageRequest},
    serializers::UserResponse,
    AppState,
};

pub async fn list_users(
    app_data: web::Data<AppState>,
    req: HttpRequest,
    params: web::Query<PageParams>,
) -> Result<HttpResponse, ApiError> {
    let count = User::count(&app_data.db).await?;
    let page = PageRequest::resolve(params.page.as_deref(), app_data.settings.page_size, count)?;

    let users = User::page(&app_data.db, page.limit(), page.offset()).await?;
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    let owned = Snippet::ids_by_owner(&app_data.db, &ids).await?;

    let results: Vec<UserResponse> = users
        .iter()
        .map(|user| {
            let snippet_ids = owned.get(&user.id).map(Vec::as_slice).unwrap_or_default();
            UserResponse::from_model(&req, user, snippet_ids)
        })
        .collect();

    Ok(HttpResponse::Ok().json(Page::new(&req, page, count, results)))
}

pub async fn retrieve_user(
    app_data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user = User::find(&app_data.db, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound)?;

    let owned = Snippet::ids_by_owner(&app_data.db, &[user.id]).await?;
    let snippet_ids = owned.get(&user.id).map(Vec::as_slice).unwrap_or_default();

    Ok(HttpResponse::Ok().json(UserResponse::from_model(&req, &user, snippet_ids)))
}
