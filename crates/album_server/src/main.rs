//! Album server entry point.
//!
//! Parses configuration, starts logging, opens the configured backend and
//! serves until Ctrl-C. A backend that cannot be opened is fatal.

use album_core::{init_logging, open_repository};
use album_server::{build_app, ServerConfig};
use clap::Parser;
use log::{error, info, warn};
use std::error::Error;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();
    if let Err(err) = run(config).await {
        eprintln!("album_server: {err}");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn Error>> {
    init_logging(config.log_level(), config.log_dir.as_deref())?;

    let backend = config.storage_backend();
    let repo = open_repository(&backend).map_err(|err| {
        error!(
            "event=server_start module=server status=error backend={} error_code={} error={}",
            backend.name(),
            err.code(),
            err
        );
        err
    })?;

    let listener = TcpListener::bind(config.bind).await?;
    info!(
        "event=server_start module=server status=ok addr={} backend={}",
        config.bind,
        backend.name()
    );

    axum::serve(listener, build_app(repo))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_stop module=server status=error error=ctrl_c_unavailable:{err}");
    }
}
