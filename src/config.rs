use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::info;

use crate::{CartError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub storage_dir: PathBuf,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            storage_dir: PathBuf::from(".cart-storage"),
            http_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Reads `CART_API_BASE_URL`, `CART_STORAGE_DIR` and
    /// `CART_HTTP_TIMEOUT_SECS`, after loading a `.env` file if one exists.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self {
            api_base_url: try_load("CART_API_BASE_URL", "http://localhost:8080")?,
            storage_dir: try_load("CART_STORAGE_DIR", ".cart-storage")?,
            http_timeout_secs: try_load("CART_HTTP_TIMEOUT_SECS", "10")?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e| CartError::Config(format!("invalid {key} value {raw:?}: {e}")))
}
