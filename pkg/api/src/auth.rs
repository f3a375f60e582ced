use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::AppState;
use crate::pages;

/// Header the upstream SSO proxy injects for authenticated requests. The
/// value is an eppn-style principal (`jdoe@example.edu`); only the local
/// part is the username.
pub const REMOTE_USER_HEADER: &str = "x-remote-user";

/// Identity resolved by the auth middleware, injected into request
/// extensions for every request that reaches a protected handler. The inner
/// value is `None` only in debug mode, where the dashboard falls back to an
/// explicit `?user=` query.
#[derive(Debug, Clone)]
pub struct RequestUser(pub Option<String>);

/// Strip the domain from an eppn-style principal.
pub fn local_part(principal: &str) -> &str {
    match principal.split_once('@') {
        Some((local, _domain)) => local,
        None => principal,
    }
}

/// Middleware: trust the SSO proxy's header, nothing else.
///
/// A missing header is a 403 in normal operation. In debug mode the request
/// proceeds without an identity and the dashboard waits for an explicit
/// `?user=` query instead.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let principal = req
        .headers()
        .get(REMOTE_USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let user = match principal {
        Some(principal) => RequestUser(Some(local_part(principal).to_string())),
        None if state.config.http.debug => RequestUser(None),
        None => {
            warn!("request without {} header rejected", REMOTE_USER_HEADER);
            return Err(pages::error_page(
                StatusCode::FORBIDDEN,
                "Authentication required. Please log in.",
            ));
        }
    };

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
