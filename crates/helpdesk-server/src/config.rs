//! Server configuration from the environment.

use std::env;
use std::time::Duration;

use anyhow::Context;
use helpdesk_assist::AssistConfig;
use helpdesk_auth::AuthConfig;
use helpdesk_db::DbConfig;

/// Full server configuration, assembled once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address, e.g. `127.0.0.1:8080`.
    pub bind_addr: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub assist: AssistConfig,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl ServerConfig {
    /// Read configuration from environment variables. The JWT key
    /// pair is the only hard requirement; everything else has a
    /// development default.
    pub fn from_env() -> anyhow::Result<Self> {
        let db = DbConfig {
            url: var_or("HELPDESK_DB_URL", "127.0.0.1:8000"),
            namespace: var_or("HELPDESK_DB_NS", "helpdesk"),
            database: var_or("HELPDESK_DB_NAME", "ticketing"),
            username: var_or("HELPDESK_DB_USER", "root"),
            password: var_or("HELPDESK_DB_PASS", "root"),
        };

        let auth = AuthConfig {
            jwt_private_key_pem: env::var("HELPDESK_JWT_PRIVATE_KEY")
                .context("HELPDESK_JWT_PRIVATE_KEY must be set (PEM-encoded Ed25519 key)")?,
            jwt_public_key_pem: env::var("HELPDESK_JWT_PUBLIC_KEY")
                .context("HELPDESK_JWT_PUBLIC_KEY must be set (PEM-encoded Ed25519 key)")?,
            token_lifetime_secs: var_or("HELPDESK_TOKEN_LIFETIME_SECS", "3600")
                .parse()
                .context("HELPDESK_TOKEN_LIFETIME_SECS must be a number")?,
            jwt_issuer: var_or("HELPDESK_JWT_ISSUER", "helpdesk"),
            pepper: env::var("HELPDESK_PASSWORD_PEPPER").ok(),
            min_password_length: var_or("HELPDESK_MIN_PASSWORD_LENGTH", "8")
                .parse()
                .context("HELPDESK_MIN_PASSWORD_LENGTH must be a number")?,
        };

        let assist = AssistConfig {
            base_url: var_or("HELPDESK_ASSIST_URL", "http://127.0.0.1:3400"),
            timeout: Duration::from_secs(
                var_or("HELPDESK_ASSIST_TIMEOUT_SECS", "30")
                    .parse()
                    .context("HELPDESK_ASSIST_TIMEOUT_SECS must be a number")?,
            ),
            max_retries: var_or("HELPDESK_ASSIST_RETRIES", "2")
                .parse()
                .context("HELPDESK_ASSIST_RETRIES must be a number")?,
        };

        Ok(Self {
            bind_addr: var_or("HELPDESK_BIND", "127.0.0.1:8080"),
            db,
            auth,
            assist,
        })
    }
}
