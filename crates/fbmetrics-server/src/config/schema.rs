use std::net::SocketAddr;

use fbmetrics_core::error::{FbMetricsError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsSection,

    #[serde(default)]
    pub instance: InstanceSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FbMetricsError::UnsupportedVersion);
        }
        self.server.validate()?;
        self.instance.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            FbMetricsError::BadRequest(format!(
                "server.listen must be a valid SocketAddr (got {})",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:9092".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self { enabled: default_enabled() }
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceSection {
    #[serde(default = "default_edition")]
    pub edition: String,
}

impl Default for InstanceSection {
    fn default() -> Self {
        Self { edition: default_edition() }
    }
}

impl InstanceSection {
    pub fn validate(&self) -> Result<()> {
        if self.edition.trim().is_empty() {
            return Err(FbMetricsError::BadRequest("instance.edition must not be empty".into()));
        }
        Ok(())
    }
}

fn default_edition() -> String {
    "personal".into()
}
