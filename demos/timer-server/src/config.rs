use std::{env, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};
use countdown_core::RegistryConfig;
use countdown_observe::LoggerConfig;

const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Server settings, read from `COUNTDOWN_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub logger: LoggerConfig,
    pub registry: RegistryConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = get("COUNTDOWN_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()
            .context("COUNTDOWN_ADDR must be host:port")?;

        let logger = LoggerConfig::from_parts(
            get("COUNTDOWN_LOG_FORMAT").as_deref(),
            get("COUNTDOWN_LOG_LEVEL").as_deref(),
        )?;

        let mut registry = RegistryConfig::default();
        if let Some(ms) = get("COUNTDOWN_TICK_MS") {
            let ms: u64 = ms.parse().context("COUNTDOWN_TICK_MS must be an integer")?;
            registry = registry.with_tick(Duration::from_millis(ms));
        }
        if let Some(secs) = get("COUNTDOWN_RETENTION_SECS") {
            let secs: u64 = secs
                .parse()
                .context("COUNTDOWN_RETENTION_SECS must be an integer")?;
            registry = registry.with_retention(Duration::from_secs(secs));
        }

        Ok(Self {
            addr,
            logger,
            registry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.addr.to_string(), DEFAULT_ADDR);
        assert_eq!(cfg.registry, RegistryConfig::default());
    }

    #[test]
    fn overrides() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("COUNTDOWN_ADDR", "0.0.0.0:9000"),
            ("COUNTDOWN_LOG_FORMAT", "json"),
            ("COUNTDOWN_TICK_MS", "250"),
            ("COUNTDOWN_RETENTION_SECS", "600"),
        ]))
        .unwrap();

        assert_eq!(cfg.addr.port(), 9000);
        assert_eq!(cfg.registry.tick, Duration::from_millis(250));
        assert_eq!(cfg.registry.retention, Some(Duration::from_secs(600)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(ServerConfig::from_lookup(lookup(&[("COUNTDOWN_ADDR", "nowhere")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("COUNTDOWN_TICK_MS", "soon")])).is_err());
    }
}
