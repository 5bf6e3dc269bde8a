use std::{fmt::Display, net::SocketAddr, str::FromStr};

use reqwest::Url;
use tracing::info;

use crate::{routes::BuildMode, AppResult};

pub struct Config {
    pub api_base: Url,
    pub mode: BuildMode,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Environment first, then `.env`, then defaults.
    pub fn load() -> AppResult<Self> {
        dotenv::dotenv().ok();

        Ok(Self {
            api_base: try_load("API_BASE_URL", "http://127.0.0.1:8000/")?,
            mode: try_load("APP_MODE", "development")?,
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:5173")?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> AppResult<T>
where
    T::Err: Display,
{
    let value = dotenv::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    Ok(
        value
            .parse()
            .map_err(|e| format!("invalid {key} value {value:?}: {e}"))?
    )
}
