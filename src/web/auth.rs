//! Login, registration and session termination

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{LoginForm, RegisterForm, SessionUser};
use crate::web::{validation_messages, views};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    /// Present when a failed login redirected back here (`/auth/login?error`).
    pub error: Option<String>,
}

/// GET /auth/login
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Html<String> {
    views::login_page(query.error.is_some())
}

/// GET /auth/registration
pub async fn registration_page() -> Html<String> {
    views::registration_page(&[], "")
}

/// POST /auth/registration
///
/// Validation failures re-render the form with field messages; success
/// redirects to the login page.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        let messages = validation_messages(&errors);
        return Ok(views::registration_page(&messages, &form.username).into_response());
    }

    match state.services.users.register(&form).await {
        Ok(_) => Ok(Redirect::to("/auth/login").into_response()),
        Err(AppError::Conflict(message)) => {
            Ok(views::registration_page(&[message], &form.username).into_response())
        }
        Err(e) => Err(e),
    }
}

/// POST /process_login
///
/// Valid credentials open a session and land on the book list; anything
/// else goes back to the login form with the error marker and no session.
pub async fn process_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let Some(user) = state
        .services
        .users
        .authenticate(&form.username, &form.password)
        .await?
    else {
        tracing::info!(username = %form.username, "login rejected");
        return Ok(Redirect::to("/auth/login?error").into_response());
    };

    let principal = SessionUser {
        username: user.username,
        role: user.role,
    };
    let token = state.services.sessions.create(&principal).await?;

    let cookie = Cookie::build((state.services.sessions.cookie_name().to_string(), token))
        .path("/")
        .http_only(true);

    tracing::info!(username = %principal.username, "session opened");
    Ok((jar.add(cookie), Redirect::to("/books")).into_response())
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> AppResult<Response> {
    let cookie_name = state.services.sessions.cookie_name().to_string();

    if let Some(cookie) = jar.get(&cookie_name) {
        state.services.sessions.destroy(cookie.value()).await?;
    }

    let mut removal = Cookie::new(cookie_name, "");
    removal.set_path("/");

    Ok((jar.remove(removal), Redirect::to("/auth/login")).into_response())
}
