use std::path::PathBuf;

use anyhow::{Context, Result};

/// Server settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub frontend_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset and empty variables both fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = var("PORT", "8080");
        let port: u16 = port
            .parse()
            .with_context(|| format!("PORT must be a port number, got {:?}", port))?;

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            db_path: var("DB_PATH", "db/cup-of-team.db").into(),
            frontend_path: var("FRONTEND_PATH", "./frontend/dist").into(),
        })
    }
}
