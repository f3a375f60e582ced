use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use pkg_types::config::VastConfig;
use pkg_types::quota::Quota;
use pkg_types::user::UserGroupInfo;

/// Thin typed wrapper over the cluster's VMS REST API.
///
/// Constructed once at startup and shared by reference through the server
/// state; every call is an independent request/response with no retry.
/// Clusters ship self-signed certificates, so certificate validation is off.
pub struct VastClient {
    http: reqwest::Client,
    base: String,
    username: String,
    password: String,
}

impl VastClient {
    pub fn new(cfg: &VastConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base: format!("https://{}/api", cfg.address),
            username: cfg.username.clone(),
            password: cfg.password.clone(),
        })
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.base, path);
        debug!("GET {} {:?}", url, query);
        let resp = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .query(query)
            .send()
            .await?;
        Ok(resp)
    }

    /// All quotas visible on the cluster, in whatever order the API returns
    /// them. That order is load-bearing: quota matching is first-match-wins.
    pub async fn list_quotas(&self) -> Result<Vec<Quota>> {
        let resp = self.get("quotas/", &[]).await?.error_for_status()?;
        let quotas: Vec<Quota> = resp.json().await?;
        debug!("cluster returned {} quotas", quotas.len());
        Ok(quotas)
    }

    /// Query the cluster's directory service for a user. `None` when the
    /// user is unknown there.
    pub async fn query_user(&self, username: &str) -> Result<Option<UserGroupInfo>> {
        let resp = self.get("users/query/", &[("name", username)]).await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status()?;
        let mut user: UserGroupInfo = resp.json().await?;
        if user.username.is_empty() {
            user.username = username.to_string();
        }
        Ok(Some(user))
    }

    /// Raw capacity payload for a path. The schema is the vendor's; only
    /// `root_data` and `details` are read downstream, by the reducer.
    pub async fn capacity(&self, path: &str) -> Result<serde_json::Value> {
        let resp = self
            .get("capacity/", &[("path", path)])
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }
}
