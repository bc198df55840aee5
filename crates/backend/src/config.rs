use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_PORT: u16 = 8080;

/// Settings for the page host, read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub port: u16,
    /// Kakao JavaScript app key. Without it the map SDK is not injected.
    pub kakao_map_api_key: Option<String>,
    /// Output of the frontend build (`index.html`, bundles, `assets/`).
    pub dist_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl HostConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value `{}`", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(HostConfig {
            port,
            kakao_map_api_key: get("KAKAO_MAP_API_KEY"),
            dist_dir: PathBuf::from(get("DIST_DIR").unwrap_or_else(|| "dist".to_string())),
            static_dir: PathBuf::from(get("STATIC_DIR").unwrap_or_else(|| "assets".to_string())),
        })
    }
}
