//! Route access policy
//!
//! Every request passes this gate before any handler runs. Paths fall into
//! exactly one of three classes: public, admin-only, or authenticated
//! (everything not matched by the first two).

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::{AppError, AppResult};
use crate::models::SessionUser;
use crate::AppState;

/// Access classes a request path can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

/// Paths reachable without a session: the login and registration flow, the
/// error page, and the credential-submission endpoint itself.
const PUBLIC_PATHS: &[&str] = &[
    "/auth/login",
    "/auth/registration",
    "/error",
    "/process_login",
    "/favicon.ico",
];

/// Prefixes reachable without a session: static assets and the JSON API.
const PUBLIC_PREFIXES: &[&str] = &["/css/", "/js/", "/api/"];

/// Admin-only paths. The class is a reserved extension point; no route is
/// currently assigned to it.
const ADMIN_PATHS: &[&str] = &[];

/// Classify a request path.
pub fn classify(path: &str) -> Access {
    if ADMIN_PATHS.contains(&path) {
        return Access::Admin;
    }
    if PUBLIC_PATHS.contains(&path) || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return Access::Public;
    }
    Access::Authenticated
}

/// Enforcement middleware. Anonymous requests to non-public paths land on
/// the login form; any live session (USER or ADMIN) passes the
/// authenticated class; admin paths additionally require `ROLE_ADMIN`.
pub async fn enforce(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let access = classify(request.uri().path());
    if access == Access::Public {
        return next.run(request).await;
    }

    let session = match resolve_session(&state, &jar).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    match (access, session) {
        (Access::Authenticated, Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        (Access::Admin, Some(user)) if user.is_admin() => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        (Access::Admin, Some(_)) => {
            AppError::Authorization("Administrator privileges required".to_string())
                .into_response()
        }
        (_, None) => Redirect::to("/auth/login").into_response(),
    }
}

async fn resolve_session(state: &AppState, jar: &CookieJar) -> AppResult<Option<SessionUser>> {
    let Some(cookie) = jar.get(state.services.sessions.cookie_name()) else {
        return Ok(None);
    };
    state.services.sessions.get(cookie.value()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_and_registration_are_public() {
        assert_eq!(classify("/auth/login"), Access::Public);
        assert_eq!(classify("/auth/registration"), Access::Public);
        assert_eq!(classify("/process_login"), Access::Public);
        assert_eq!(classify("/error"), Access::Public);
    }

    #[test]
    fn static_assets_and_api_are_public() {
        assert_eq!(classify("/css/main.css"), Access::Public);
        assert_eq!(classify("/js/app.js"), Access::Public);
        assert_eq!(classify("/favicon.ico"), Access::Public);
        assert_eq!(classify("/api/health"), Access::Public);
        assert_eq!(classify("/api/books"), Access::Public);
    }

    #[test]
    fn everything_else_requires_a_session() {
        assert_eq!(classify("/"), Access::Authenticated);
        assert_eq!(classify("/books"), Access::Authenticated);
        assert_eq!(classify("/books/42"), Access::Authenticated);
        assert_eq!(classify("/books/new"), Access::Authenticated);
        assert_eq!(classify("/logout"), Access::Authenticated);
    }

    #[test]
    fn public_prefixes_do_not_leak_siblings() {
        // "/cssx" must not ride on the "/css/" prefix.
        assert_eq!(classify("/cssx"), Access::Authenticated);
        assert_eq!(classify("/apis"), Access::Authenticated);
    }
}
