use std::env;
use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// Fallback signing secret used when `TOKEN_SECRET` is unset.
///
/// Kept for parity with deployments that never configure one; a warning is
/// logged at startup so the operator knows tokens are forgeable.
const DEFAULT_TOKEN_SECRET: &str = "secreto";

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the PostgreSQL database.
    pub database_url: String,
    /// The port the HTTP server listens on.
    pub listen_port: u16,
    /// The secret used to sign and verify session tokens.
    pub token_secret: Zeroizing<String>,
    /// Session token lifetime in seconds.
    pub token_ttl_secs: i64,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let token_secret = match env::var("TOKEN_SECRET") {
            Ok(secret) if !secret.is_empty() => Zeroizing::new(secret),
            _ => {
                tracing::warn!(
                    "TOKEN_SECRET not set, falling back to the built-in default. \
                     Tokens signed with it are forgeable; set TOKEN_SECRET in production"
                );
                Zeroizing::new(DEFAULT_TOKEN_SECRET.to_string())
            }
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            listen_port: env::var("LISTEN_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid LISTEN_PORT")?,
            token_secret,
            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .context("Invalid TOKEN_TTL_SECS")?,
        })
    }
}
