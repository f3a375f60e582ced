use axum::{
    Extension,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use pkg_types::lookup::Lookup;
use pkg_vast::lookup::quota_for_user;

use crate::AppState;
use crate::auth::RequestUser;
use crate::pages;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Debug-mode only: the user to look up when no SSO header is present.
    #[serde(default)]
    pub user: Option<String>,
}

/// GET / — render the quota dashboard for the authenticated user.
///
/// Group lookup, quota matching, and the capacity fetch all collapse their
/// failures into "no quota found"; this handler never produces a 500 for an
/// upstream absence.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
    Extension(RequestUser(identity)): Extension<RequestUser>,
) -> Response {
    let username = match identity {
        Some(username) => username,
        // Debug mode let the request through without an identity; wait
        // for an explicit ?user= query before doing any lookups.
        None => match query.user.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return pages::user_prompt_page().into_response(),
        },
    };

    info!("dashboard requested for {}", username);
    match quota_for_user(&state.client, &state.config, &username).await {
        Lookup::Found(report) => pages::dashboard_page(&username, &report).into_response(),
        Lookup::NotFound | Lookup::Unavailable => {
            pages::no_quota_page(&username).into_response()
        }
    }
}
