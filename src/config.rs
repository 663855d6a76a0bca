// src/config.rs
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable not set"))?;

        let port = std::env::var("ROCKET_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("ROCKET_PORT must be a valid port number")?;

        Ok(Self { database_url, port })
    }
}
