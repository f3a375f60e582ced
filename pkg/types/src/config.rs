use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit config file, highest priority.
pub const CONFIG_ENV: &str = "QUOTADASH_CONFIG";

/// Dashboard configuration (YAML).
///
/// Example `quotadash.yaml`:
/// ```yaml
/// vast:
///   address: 10.143.11.203
///   username: admin
///   password: "123456"
/// ssh:
///   host: trace.cmu.edu
///   username: rwalsh
///   key-file: ~/.ssh/id_rsa
/// http:
///   port: 5001
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vast: VastConfig,
    #[serde(default)]
    pub ssh: SshConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Cluster API endpoint and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VastConfig {
    #[serde(default = "default_vast_address")]
    pub address: String,
    #[serde(default = "default_vast_username")]
    pub username: String,
    #[serde(default = "default_vast_password")]
    pub password: String,
    #[serde(default = "default_vast_timeout", alias = "timeout")]
    pub timeout_secs: u64,
}

/// Admin host used for the remote `groups` lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshConfig {
    #[serde(default = "default_ssh_host")]
    pub host: String,
    #[serde(default = "default_ssh_username")]
    pub username: String,
    #[serde(default = "default_ssh_key_file", alias = "key-file")]
    pub key_file: String,
    #[serde(default = "default_ssh_timeout", alias = "timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub port: u16,
    /// When set, requests without the SSO header are tolerated and the
    /// dashboard accepts an explicit `?user=` query instead.
    #[serde(default)]
    pub debug: bool,
}

/// Declared for config-file compatibility; the read path does not cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_ttl", alias = "ttl")]
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_vast_address() -> String {
    "10.143.11.203".to_string()
}
fn default_vast_username() -> String {
    "admin".to_string()
}
fn default_vast_password() -> String {
    "123456".to_string()
}
fn default_vast_timeout() -> u64 {
    30
}
fn default_ssh_host() -> String {
    "trace.cmu.edu".to_string()
}
fn default_ssh_username() -> String {
    "rwalsh".to_string()
}
fn default_ssh_key_file() -> String {
    "~/.ssh/id_rsa".to_string()
}
fn default_ssh_timeout() -> u64 {
    10
}
fn default_http_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    5001
}
fn default_cache_ttl() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for VastConfig {
    fn default() -> Self {
        Self {
            address: default_vast_address(),
            username: default_vast_username(),
            password: default_vast_password(),
            timeout_secs: default_vast_timeout(),
        }
    }
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            host: default_ssh_host(),
            username: default_ssh_username(),
            key_file: default_ssh_key_file(),
            timeout_secs: default_ssh_timeout(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_http_host(),
            port: default_http_port(),
            debug: false,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Load the config from an explicit path, or the first existing file in the
/// standard search locations. With no file anywhere, the built-in defaults
/// for local testing apply.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => search_path(),
    };
    match path {
        Some(p) => {
            let content = std::fs::read_to_string(&p)
                .map_err(|e| anyhow::anyhow!("reading config {}: {}", p.display(), e))?;
            let config: Config = serde_yaml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?;
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Search order: env override, working directory, install directory, user
/// home, system-wide.
fn search_path() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(explicit) = std::env::var(CONFIG_ENV)
        && !explicit.is_empty()
    {
        candidates.push(PathBuf::from(explicit));
    }
    candidates.push(PathBuf::from("quotadash.yaml"));
    candidates.push(PathBuf::from("/opt/quotadash/quotadash.yaml"));
    if let Some(home) = std::env::var_os("HOME") {
        candidates.push(Path::new(&home).join(".quotadash.yaml"));
    }
    candidates.push(PathBuf::from("/etc/quotadash/config.yaml"));

    candidates.into_iter().find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_file() {
        let config = Config::default();
        assert_eq!(config.http.port, 5001);
        assert_eq!(config.ssh.timeout_secs, 10);
        assert_eq!(config.vast.timeout_secs, 30);
        assert_eq!(config.cache.ttl_secs, 600);
        assert_eq!(config.logging.level, "info");
        assert!(!config.http.debug);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
vast:
  address: 172.19.16.30
  username: svc-dash
  password: hunter2
http:
  port: 8080
  debug: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.vast.address, "172.19.16.30");
        assert_eq!(config.vast.timeout_secs, 30);
        assert_eq!(config.http.port, 8080);
        assert!(config.http.debug);
        // Untouched sections come back as defaults.
        assert_eq!(config.ssh.host, "trace.cmu.edu");
    }

    #[test]
    fn test_kebab_case_aliases() {
        let yaml = r#"
ssh:
  host: admin.example.edu
  username: ops
  key-file: /srv/keys/dash_ed25519
  timeout: 15
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.ssh.key_file, "/srv/keys/dash_ed25519");
        assert_eq!(config.ssh.timeout_secs, 15);
    }
}
