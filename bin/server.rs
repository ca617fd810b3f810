// Ank Numerology - Web Server
// Page + calculate API + saveUser endpoint with Axum

use ank_numerology::api::{router, AppState};
use ank_numerology::{open_database, AppConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ank-server", version, about = "Numerology web page and saveUser API")]
struct ServerArgs {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides config and ANK_DB_PATH)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8080 (overrides config and ANK_BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,
}

impl ServerArgs {
    fn into_config(self) -> Result<AppConfig> {
        Ok(AppConfig::load(self.config.as_deref())?
            .with_db_path(self.db)
            .with_bind_addr(self.bind))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    println!("🌐 Ank Numerology - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = args.into_config()?;

    let conn = open_database(&config.db_path)?;
    println!("✓ Database opened: {:?}", config.db_path);

    let app = router(AppState::new(conn));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    println!("\n🚀 Server running on http://{}", config.bind_addr);
    println!("   Save: POST /saveUser");
    println!("   API:  POST /api/calculate");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Server stopped with an error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = ServerArgs::try_parse_from([
            "ank-server",
            "--db",
            "/tmp/users.db",
            "--bind",
            "127.0.0.1:8080",
        ])
        .unwrap();
        let config = args.into_config().unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/users.db"));
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_positional_config_rejected() {
        assert!(ServerArgs::try_parse_from(["ank-server", "config.json"]).is_err());
    }
}
