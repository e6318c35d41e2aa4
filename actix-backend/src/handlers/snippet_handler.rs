use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};

use crate::{
    error::ApiError,
    models::{AuthUser, Snippet, SnippetFields},
    pagination::{Page, PageParams, PageRequest},
    parsers,
    permissions::{self, SNIPPET_PERMISSIONS},
    serializers::{SaveMode, SnippetInput, SnippetResponse},
    AppState,
};

type MaybeUser = Option<web::ReqData<AuthUser>>;

fn user_ref(user: &MaybeUser) -> Option<&AuthUser> {
    user.as_deref()
}

async fn get_snippet(app_data: &AppState, id: i64) -> Result<Snippet, ApiError> {
    Snippet::find(&app_data.db, id).await?.ok_or(ApiError::NotFound)
}

// _______________________________________ Collection _______________________________________
pub async fn list_snippets(
    app_data: web::Data<AppState>,
    req: HttpRequest,
    params: web::Query<PageParams>,
) -> Result<HttpResponse, ApiError> {
    let count = Snippet::count(&app_data.db).await?;
    let page = PageRequest::resolve(params.page.as_deref(), app_data.settings.page_size, count)?;

    let snippets = Snippet::page(&app_data.db, page.limit(), page.offset()).await?;
    let results: Vec<SnippetResponse> = snippets
        .iter()
        .map(|snippet| SnippetResponse::from_model(&req, snippet))
        .collect();

    Ok(HttpResponse::Ok().json(Page::new(&req, page, count, results)))
}

pub async fn create_snippet(
    app_data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
    user: MaybeUser,
) -> Result<HttpResponse, ApiError> {
    permissions::check(SNIPPET_PERMISSIONS, req.method(), user_ref(&user))?;
    let owner = user.ok_or(ApiError::NotAuthenticated)?;

    let data = parsers::parse(&req, &body)?;
    let fields = SnippetInput::from_data(&data)?.into_fields(SaveMode::Create)?;

    let snippet = Snippet::create(&app_data.db, owner.id, &fields).await?;
    log::info!("snippet {} created by {}", snippet.id, owner.username);

    Ok(HttpResponse::Created().json(SnippetResponse::from_model(&req, &snippet)))
}

// _______________________________________ Detail _______________________________________
pub async fn retrieve_snippet(
    app_data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let snippet = get_snippet(&app_data, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SnippetResponse::from_model(&req, &snippet)))
}

pub async fn update_snippet(
    app_data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Bytes,
    user: MaybeUser,
) -> Result<HttpResponse, ApiError> {
    save(app_data, req, path.into_inner(), body, user, false).await
}

pub async fn partial_update_snippet(
    app_data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Bytes,
    user: MaybeUser,
) -> Result<HttpResponse, ApiError> {
    save(app_data, req, path.into_inner(), body, user, true).await
}

async fn save(
    app_data: web::Data<AppState>,
    req: HttpRequest,
    id: i64,
    body: web::Bytes,
    user: MaybeUser,
    partial: bool,
) -> Result<HttpResponse, ApiError> {
    permissions::check(SNIPPET_PERMISSIONS, req.method(), user_ref(&user))?;
    let snippet = get_snippet(&app_data, id).await?;
    permissions::check_object(SNIPPET_PERMISSIONS, req.method(), user_ref(&user), &snippet)?;

    let stored = SnippetFields::from(&snippet);
    let mode = if partial {
        SaveMode::PartialUpdate(&stored)
    } else {
        SaveMode::Update(&stored)
    };

    let data = parsers::parse(&req, &body)?;
    let fields = SnippetInput::from_data(&data)?.into_fields(mode)?;

    let updated = Snippet::update(&app_data.db, id, &fields)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(SnippetResponse::from_model(&req, &updated)))
}

pub async fn destroy_snippet(
    app_data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    user: MaybeUser,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    permissions::check(SNIPPET_PERMISSIONS, req.method(), user_ref(&user))?;
    let snippet = get_snippet(&app_data, id).await?;
    permissions::check_object(SNIPPET_PERMISSIONS, req.method(), user_ref(&user), &snippet)?;

    if !Snippet::delete(&app_data.db, id).await? {
        return Err(ApiError::NotFound);
    }
    log::info!("snippet {id} deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// The stored highlighted page, served as-is.
pub async fn highlight_snippet(
    app_data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let snippet = get_snippet(&app_data, path.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(snippet.highlighted))
}
