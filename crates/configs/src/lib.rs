use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_WORKER_THREADS: usize = 4;
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            worker_threads: Some(DEFAULT_WORKER_THREADS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Optional second listener for `/healthz` and `/metrics`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AdminConfig {
    #[serde(default)]
    pub addr: Option<String>,
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_max_body_bytes() -> usize { DEFAULT_MAX_BODY_BYTES }

/// Read the file named by `CONFIG_PATH` (or `config.toml`). A missing file
/// yields the defaults; a malformed one is an error.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file_or_default(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)
        .map_err(|e| anyhow!("invalid config file {path}: {e}"))?;
    Ok(cfg)
}

pub fn load_from_file_or_default(path: &str) -> Result<AppConfig> {
    if Path::new(path).exists() {
        load_from_file(path)
    } else {
        Ok(AppConfig::default())
    }
}

impl AppConfig {
    /// Defaults, then the config file, then environment variables.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env_with(|name| std::env::var(name).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Apply `PORT`, `HOST`, `TOKIO_WORKER_THREADS`, `MAX_BODY_BYTES` and
    /// `ADMIN_ADDR` from `lookup`. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(port) = var("PORT") {
            self.server.port = port
                .parse::<u16>()
                .map_err(|_| anyhow!("PORT must be an integer in 1..=65535, got {port:?}"))?;
        }
        if let Some(host) = var("HOST") {
            self.server.host = host;
        }
        if let Some(threads) = var("TOKIO_WORKER_THREADS") {
            self.server.worker_threads = Some(
                threads
                    .parse::<usize>()
                    .map_err(|_| anyhow!("TOKIO_WORKER_THREADS must be a positive integer, got {threads:?}"))?,
            );
        }
        if let Some(limit) = var("MAX_BODY_BYTES") {
            self.server.max_body_bytes = limit
                .parse::<usize>()
                .map_err(|_| anyhow!("MAX_BODY_BYTES must be a positive integer, got {limit:?}"))?;
        }
        if let Some(addr) = var("ADMIN_ADDR") {
            self.admin.addr = Some(addr);
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.admin.normalize();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("server.max_body_bytes must be >= 1"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AdminConfig {
    fn normalize(&mut self) {
        if self.addr.as_deref().is_some_and(|a| a.trim().is_empty()) {
            self.addr = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_listen_on_port_3000() {
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:3000");
        assert_eq!(cfg.admin.addr, None);
    }

    #[test]
    fn partial_toml_keeps_field_defaults() {
        let cfg: AppConfig = toml::from_str("[server]\nport = 8088\n").unwrap();
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.server.host, DEFAULT_HOST);
        assert_eq!(cfg.server.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg: AppConfig =
            toml::from_str("[server]\nport = 8088\n[admin]\naddr = \"127.0.0.1:9000\"\n").unwrap();
        cfg.apply_env_with(lookup(&[
            ("PORT", "4000"),
            ("HOST", "127.0.0.1"),
            ("ADMIN_ADDR", "127.0.0.1:9188"),
            ("MAX_BODY_BYTES", "1024"),
        ]))
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:4000");
        assert_eq!(cfg.server.max_body_bytes, 1024);
        assert_eq!(cfg.admin.addr.as_deref(), Some("127.0.0.1:9188"));
    }

    #[test]
    fn empty_port_is_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_with(lookup(&[("PORT", "  ")])).unwrap();
        assert_eq!(cfg.server.port, DEFAULT_PORT);
    }

    #[test]
    fn unparsable_port_is_rejected() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env_with(lookup(&[("PORT", "http")])).is_err());
        assert!(cfg.apply_env_with(lookup(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn zero_port_fails_validation() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_with(lookup(&[("PORT", "0")])).unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn zero_worker_threads_normalise_to_default() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_with(lookup(&[("TOKIO_WORKER_THREADS", "0")])).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.worker_threads, Some(DEFAULT_WORKER_THREADS));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_from_file_or_default("/nonexistent/memkv-config.toml").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
