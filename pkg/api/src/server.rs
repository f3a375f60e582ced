use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use tokio::net::TcpListener;
use tracing::{error, info};

use pkg_types::config::Config;
use pkg_vast::client::VastClient;

use crate::AppState;
use crate::auth::auth_middleware;
use crate::handlers::{dashboard, health};
use crate::pages;
use crate::request_id::request_id_middleware;

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port).parse()?;

    let client = VastClient::new(&config.vast)?;
    let state = AppState {
        client: Arc::new(client),
        config: Arc::new(config),
    };

    // Protected page routes
    let page_routes = Router::new()
        .route("/", get(dashboard::dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Public routes + merged
    let app = Router::new()
        .route("/health", get(health::health_check))
        .merge(page_routes)
        .fallback(pages::not_found)
        .layer(middleware::from_fn(internal_error_page))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state);

    info!("Starting dashboard server on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Replace bare 500 responses with the shared error shell. The cause is
/// already logged where it happened; the user sees only a generic message.
async fn internal_error_page(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    if response.status() == StatusCode::INTERNAL_SERVER_ERROR {
        error!("internal error serving {} {}", method, path);
        return pages::error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred.",
        );
    }
    response
}
