//! Registration, login and logout endpoints

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    error::AppResult,
    models::user::{LoginForm, RegisterForm},
    AppState,
};

use super::{session_from_headers, SessionUser, SESSION_COOKIE};

/// Root redirect: home for signed-in callers, login otherwise
pub async fn root(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if session_from_headers(&headers, &state.config.session.secret).is_some() {
        Redirect::to("/home")
    } else {
        Redirect::to("/login")
    }
}

/// Registration view. The form itself is the frontend's concern; a caller
/// who already has a session is sent home.
#[utoipa::path(
    get,
    path = "/register",
    tag = "auth",
    responses(
        (status = 200, description = "Registration form available"),
        (status = 303, description = "Already signed in, redirected home")
    )
)]
pub async fn register_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if session_from_headers(&headers, &state.config.session.secret).is_some() {
        Redirect::to("/home").into_response()
    } else {
        StatusCode::OK.into_response()
    }
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created, redirected to login"),
        (status = 400, description = "Empty username or password"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Redirect> {
    state.services.accounts.register(&form).await?;
    Ok(Redirect::to("/login"))
}

/// Login view, mirroring the registration view
#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    responses(
        (status = 200, description = "Login form available"),
        (status = 303, description = "Already signed in, redirected home")
    )
)]
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if session_from_headers(&headers, &state.config.session.secret).is_some() {
        Redirect::to("/home").into_response()
    } else {
        StatusCode::OK.into_response()
    }
}

/// Sign in and establish a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, session cookie set"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let (token, user) = state
        .services
        .accounts
        .authenticate(&form.username, &form.password)
        .await?;

    tracing::debug!(user_id = user.id, "Session established");

    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);

    Ok((jar.add(cookie), Redirect::to("/home")))
}

/// Clear the session
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 303, description = "Session cleared, redirected to login")
    )
)]
pub async fn logout(SessionUser(_session): SessionUser, jar: CookieJar) -> (CookieJar, Redirect) {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), Redirect::to("/login"))
}
