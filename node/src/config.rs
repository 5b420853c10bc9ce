// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axiom_kernel::config::{
    DEFAULT_ALERT_COOLDOWN_MS, DEFAULT_DIVERGENCE_THRESHOLD, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_MS,
};
use axiom_kernel::RetryPolicy;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Ledger JSON-RPC endpoint. Empty means unset; the tick fails with a configuration error.
    pub rpc_url: String,
    pub contract_address: String,
    pub divergence_threshold: f64,
    pub max_retries: u32,
    pub retry_base: Duration,
    pub alert_cooldown_ms: u64,
    pub tick_budget: Duration,
    pub store: StoreKind,
    pub store_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub auth_token: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            contract_address: String::new(),
            divergence_threshold: DEFAULT_DIVERGENCE_THRESHOLD,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base: Duration::from_millis(DEFAULT_RETRY_BASE_MS),
            alert_cooldown_ms: DEFAULT_ALERT_COOLDOWN_MS,
            tick_budget: Duration::from_secs(300),
            store: StoreKind::File,
            store_dir: PathBuf::from("./axiom-data"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            auth_token: None,
        }
    }
}

impl NodeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Self::default();

        if let Some(v) = get("RPC_URL") {
            cfg.rpc_url = v;
        }
        if let Some(v) = get("CONTRACT_ADDRESS") {
            cfg.contract_address = v;
        }
        if let Some(v) = get("DIVERGENCE_THRESHOLD") {
            cfg.divergence_threshold = parse("DIVERGENCE_THRESHOLD", &v)?;
            if !(0.0..=1.0).contains(&cfg.divergence_threshold) {
                return Err(invalid("DIVERGENCE_THRESHOLD", &v, "must be within [0, 1]"));
            }
        }
        if let Some(v) = get("MAX_RETRIES") {
            cfg.max_retries = parse("MAX_RETRIES", &v)?;
            if cfg.max_retries == 0 {
                return Err(invalid("MAX_RETRIES", &v, "at least one attempt is required"));
            }
        }
        if let Some(v) = get("ALERT_COOLDOWN_MS") {
            cfg.alert_cooldown_ms = parse("ALERT_COOLDOWN_MS", &v)?;
        }
        if let Some(v) = get("AXIOM_RETRY_BASE_MS") {
            cfg.retry_base = Duration::from_millis(parse("AXIOM_RETRY_BASE_MS", &v)?);
        }
        if let Some(v) = get("AXIOM_TICK_BUDGET_SECS") {
            cfg.tick_budget = Duration::from_secs(parse("AXIOM_TICK_BUDGET_SECS", &v)?);
        }
        if let Some(v) = get("AXIOM_STORE") {
            cfg.store = match v.to_ascii_lowercase().as_str() {
                "file" => StoreKind::File,
                "memory" => StoreKind::Memory,
                _ => return Err(invalid("AXIOM_STORE", &v, "expected `file` or `memory`")),
            };
        }
        if let Some(v) = get("AXIOM_STORE_DIR") {
            cfg.store_dir = PathBuf::from(v);
        }
        if let Some(v) = get("AXIOM_BIND_ADDR") {
            cfg.bind_addr = parse("AXIOM_BIND_ADDR", &v)?;
        }
        cfg.auth_token = get("AXIOM_AUTH_TOKEN");

        Ok(cfg)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_base)
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| invalid(var, value, &e.to_string()))
}

fn invalid(var: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
