use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;

use crate::{
    error::ApiError,
    models::{AuthUser, User},
    utils::auth::{decode_token, verify_password, Credentials},
    AppState,
};

/// Resolves the `Authorization` header, if any, to an [`AuthUser`] stored in
/// the request extensions. Requests without the header, or with a scheme other
/// than Bearer or Basic, pass through as anonymous. Bad credentials are
/// answered with 401 straight away.
///
/// Wrapped around the snippet and user resources only, so the `/api-auth`
/// endpoints never see a stale access token.
#[derive(Clone)]
pub struct Authenticate {
    app_data: web::Data<AppState>,
}

impl Authenticate {
    pub fn new(app_data: web::Data<AppState>) -> Self {
        Self { app_data }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateMiddleware {
            service: Rc::new(service),
            app_data: self.app_data.clone(),
        }))
    }
}

pub struct AuthenticateMiddleware<S> {
    service: Rc<S>,
    app_data: web::Data<AppState>,
}

impl<S, B> Service<ServiceRequest> for AuthenticateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let app_data = self.app_data.clone();

        let header = req
            .headers()
            .get(AUTHORIZATION)
            .map(|h| h.to_str().map(str::to_owned));

        Box::pin(async move {
            let credentials = match header {
                None => None,
                Some(Ok(value)) => match Credentials::parse(&value) {
                    Ok(credentials) => credentials,
                    Err(err) => return Ok(reject(req, err)),
                },
                Some(Err(_)) => {
                    return Ok(reject(
                        req,
                        ApiError::AuthenticationFailed("Invalid authorization header.".into()),
                    ))
                }
            };

            if let Some(credentials) = credentials {
                match authenticate(&app_data, credentials).await {
                    Ok(user) => {
                        req.extensions_mut().insert(user);
                    }
                    Err(err) => return Ok(reject(req, err)),
                }
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn reject<B>(req: ServiceRequest, err: ApiError) -> ServiceResponse<EitherBody<B>> {
    if let ApiError::AuthenticationFailed(reason) = &err {
        log::debug!("rejected credentials for {}: {reason}", req.path());
    }
    let (request, _payload) = req.into_parts();
    ServiceResponse::new(request, HttpResponse::from_error(err).map_into_right_body())
}

pub async fn authenticate(app_data: &AppState, credentials: Credentials) -> Result<AuthUser, ApiError> {
    match credentials {
        Credentials::Bearer(token) => {
            let claims = decode_token(&token, &app_data.settings.jwt_access_secret)
                .map_err(|_| ApiError::AuthenticationFailed("Invalid or expired token".into()))?;

            let user = User::find(&app_data.db, claims.user.id)
                .await?
                .ok_or_else(|| ApiError::AuthenticationFailed("User not found.".into()))?;

            Ok(AuthUser { id: user.id, username: user.username })
        }
        Credentials::Basic { username, password } => {
            let user = User::find_by_username(&app_data.db, &username).await?;
            match user {
                Some(user) if verify_password(&password, &user.password_hash) => {
                    Ok(AuthUser { id: user.id, username: user.username })
                }
                _ => Err(ApiError::AuthenticationFailed("Invalid username/password.".into())),
            }
        }
    }
}
