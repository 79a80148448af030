use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Curator account ensured at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct CuratorSeed {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub jwt: JwtConfig,
    pub body_limit_bytes: usize,
    pub curator: Option<CuratorSeed>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "pathos".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "pathos-curators".into()),
            ttl_minutes: env_or("JWT_TTL_MINUTES", 60),
        };

        let curator = match (
            std::env::var("CURATOR_EMAIL").ok(),
            std::env::var("CURATOR_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some(CuratorSeed { email, password }),
            (None, None) => None,
            _ => anyhow::bail!("CURATOR_EMAIL and CURATOR_PASSWORD must be set together"),
        };

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("APP_PORT", 4000),
            database_url,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10),
            jwt,
            body_limit_bytes: env_or("BODY_LIMIT_BYTES", 50 * 1024 * 1024),
            curator,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
