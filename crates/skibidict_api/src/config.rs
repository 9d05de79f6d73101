use skibidict_core::Config;
use std::net::SocketAddr;

pub const ENV_BIND: &str = "SKIBIDICT_BIND";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Server configuration: the shared core settings plus the listen address.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub core: Config,
    pub bind: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    /// Returns an error when `SKIBIDICT_BIND` is not a `host:port` address.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup(ENV_BIND)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind
            .parse::<SocketAddr>()
            .map_err(|err| format!("invalid {ENV_BIND} `{bind}`: {err}"))?;

        Ok(Self {
            core: Config::from_lookup(&lookup),
            bind,
        })
    }
}
