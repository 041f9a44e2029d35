//! Command-line configuration for the album server.

use album_core::{default_log_level, StorageBackend};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_DB_PATH: &str = "albums.sqlite3";

/// Storage backend selectable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Process-local catalog, lost on exit.
    Memory,
    /// SQLite database file.
    Sqlite,
}

/// Album catalog HTTP service.
#[derive(Debug, Clone, Parser)]
#[command(name = "album_server", version, about)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Storage backend.
    #[arg(long, value_enum, default_value_t = BackendKind::Memory)]
    pub backend: BackendKind,

    /// Database file used by the sqlite backend.
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Load the demo catalog at startup.
    #[arg(long)]
    pub seed: bool,

    /// Log level (trace|debug|info|warn|error); build-mode default when unset.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when unset.
    #[arg(long)]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    pub fn storage_backend(&self) -> StorageBackend {
        match self.backend {
            BackendKind::Memory => StorageBackend::Memory { seed: self.seed },
            BackendKind::Sqlite => StorageBackend::Sqlite {
                path: self.db_path.clone(),
                seed: self.seed,
            },
        }
    }
}
