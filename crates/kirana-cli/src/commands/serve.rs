//! Web server command implementation

use std::path::Path;

use anyhow::Result;
use tracing::info;

use kirana_server::ServerConfig;

use super::open_db;

/// Environment variable holding the bearer API key(s), comma-separated
pub const API_KEY_ENV: &str = "KIRANA_API_KEY";

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    let db = open_db(db_path)?;

    let api_keys: Vec<String> = std::env::var(API_KEY_ENV)
        .map(|raw| {
            raw.split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if !no_auth && api_keys.is_empty() {
        anyhow::bail!(
            "Authentication is on but {} is not set. Set it, or pass --no-auth for local \
             development.",
            API_KEY_ENV
        );
    }

    if !api_keys.is_empty() {
        info!("API key auth enabled ({} key(s))", api_keys.len());
    }

    let config = ServerConfig {
        require_auth: !no_auth,
        allowed_origins: vec![],
        api_keys,
    };

    let static_dir = static_dir.map(|p| p.to_string_lossy().to_string());
    kirana_server::serve(db, host, port, static_dir.as_deref(), config).await
}
