//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

mod server;

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

/// Command-line and environment configuration for the server binary.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "SkinInsight backend API server")]
struct Args {
    /// Socket address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// PostgreSQL connection URL; omit to run on fixture ports.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Path to the session key material.
    #[arg(long, env = "SESSION_KEY_FILE", default_value = "/var/run/secrets/session_key")]
    session_key_file: String,

    /// Allow an ephemeral session key outside debug builds.
    #[arg(long, env = "SESSION_ALLOW_EPHEMERAL")]
    session_allow_ephemeral: bool,

    /// Drop the `Secure` flag from session cookies; only for local HTTP.
    #[arg(long, env = "SESSION_INSECURE_COOKIES")]
    insecure_cookies: bool,
}

fn load_session_key(args: &Args) -> std::io::Result<Key> {
    match std::fs::read(&args.session_key_file) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || args.session_allow_ephemeral {
                warn!(path = %args.session_key_file, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {e}",
                    args.session_key_file
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();
    let key = load_session_key(&args)?;

    let cookie_secure = !args.insecure_cookies;
    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, args.bind_addr);
    match &args.database_url {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
            config = config.with_db_pool(pool);
        }
        None => {
            warn!("no DATABASE_URL configured, serving fixture data");
        }
    }

    info!(bind_addr = %config.bind_addr(), "starting server");
    server::run(config)?.await
}
