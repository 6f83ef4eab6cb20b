//! Service configuration

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// Path to the SQLite catalog database
    pub database_path: String,

    /// Object storage (R2 bucket) credentials and location
    pub storage: StorageConfig,

    /// External book-search provider settings
    pub search: SearchConfig,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub access_key: String,
    pub secret_key: String,
    /// Account identifier, used to build the storage endpoint
    pub account_id: String,
    pub bucket: String,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Host of the book-search API; also sent as the API host header
    pub api_host: String,
    pub api_key: String,
    /// URL of the book-detail service
    pub detail_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Storage credentials and the search API key have no defaults and must
    /// be set; everything else falls back to development defaults.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: match std::env::var("PORT") {
                Ok(port) => port.parse().context("PORT is not a valid port number")?,
                Err(_) => 8080,
            },
            database_path: env_or("DATABASE_PATH", "knowledgehub.db"),
            storage: StorageConfig {
                access_key: required("R2_ACCESS_KEY")?,
                secret_key: required("R2_SECRET_KEY")?,
                account_id: required("R2_ACCOUNT_ID")?,
                bucket: env_or("R2_BUCKET", "knowledgehub-books"),
            },
            search: SearchConfig {
                api_host: env_or("BOOK_API_HOST", "annas-archive-api.p.rapidapi.com"),
                api_key: required("BOOK_API_KEY")?,
                detail_url: env_or("BOOK_DETAIL_URL", "https://lgate.glitternode.ru/v1/book"),
            },
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}
