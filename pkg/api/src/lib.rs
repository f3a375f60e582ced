pub mod auth;
pub mod handlers;
pub mod pages;
pub mod request_id;
pub mod server;

use std::sync::Arc;

use pkg_types::config::Config;
use pkg_vast::client::VastClient;

/// Shared application state injected into all Axum handlers.
///
/// The cluster client is constructed once at startup and reused for the
/// life of the process; handlers only borrow it.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<VastClient>,
    pub config: Arc<Config>,
}
