//! HTTP handlers for the Shelfmark routes

pub mod auth;
pub mod books;
pub mod health;
pub mod notes;
pub mod openapi;
pub mod stats;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{error::AppError, models::user::SessionClaims, AppState};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "shelfmark_session";

/// Resolve the session carried by the request headers, if any
pub(crate) fn session_from_headers(headers: &HeaderMap, secret: &str) -> Option<SessionClaims> {
    let jar = CookieJar::from_headers(headers);
    let token = jar.get(SESSION_COOKIE)?.value().to_string();
    SessionClaims::from_token(&token, secret).ok()
}

/// Extractor for the authenticated user behind the session cookie.
/// Requests without a valid session are redirected to the login page
/// before any handler body runs.
pub struct SessionUser(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = session_from_headers(&parts.headers, &state.config.session.secret)
            .ok_or(AppError::LoginRequired)?;

        Ok(SessionUser(claims))
    }
}
