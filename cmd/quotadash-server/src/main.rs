use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pkg_api::server::start_server;
use pkg_types::config::{Config, LoggingConfig, load_config};

#[derive(Parser, Debug)]
#[command(name = "quotadash-server", about = "VAST storage-quota dashboard")]
struct Cli {
    /// Path to YAML config file (standard locations searched when omitted)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Tolerate missing auth headers and accept ?user= queries
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Merge: CLI args > config file > defaults
    let mut config: Config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.http.port = port;
    }
    if let Some(host) = cli.host {
        config.http.host = host;
    }
    if cli.debug {
        config.http.debug = true;
    }

    init_tracing(&config.logging)?;

    info!("Starting quotadash-server");
    info!("  Cluster:  {}", config.vast.address);
    info!("  SSH:      {}@{}", config.ssh.username, config.ssh.host);
    info!("  Listen:   {}:{}", config.http.host, config.http.port);
    info!("  Debug:    {}", config.http.debug);

    start_server(config).await
}

/// Log to stderr, or to the configured file. `RUST_LOG` overrides the
/// configured level.
fn init_tracing(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    match &cfg.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}
