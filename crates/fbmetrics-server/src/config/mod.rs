//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use fbmetrics_core::error::{FbMetricsError, Result};

pub use schema::{InstanceSection, MetricsSection, ServerConfig, ServerSection};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "FBMETRICS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "fbmetrics.yaml";

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| FbMetricsError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| FbMetricsError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Config path from `FBMETRICS_CONFIG`, or `fbmetrics.yaml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
