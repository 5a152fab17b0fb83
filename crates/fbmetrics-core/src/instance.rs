//! Build identity of the running server.

use crate::names::INSTALLATION_ID_ENV;

/// Build number baked in at compile time (`FBMETRICS_BUILD_NUMBER`).
const BUILD_NUMBER: &str = match option_env!("FBMETRICS_BUILD_NUMBER") {
    Some(n) => n,
    None => "dev",
};

/// Static snapshot of the running build. Set once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceInfo {
    pub version: String,
    pub build_num: String,
    pub edition: String,
    /// Cloud installation identifier. Empty for self-hosted installs.
    pub installation_id: String,
}

impl InstanceInfo {
    pub fn new(
        version: impl Into<String>,
        build_num: impl Into<String>,
        edition: impl Into<String>,
        installation_id: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            build_num: build_num.into(),
            edition: edition.into(),
            installation_id: installation_id.into(),
        }
    }

    /// Describe this build, reading the installation id from
    /// `MM_CLOUD_INSTALLATION_ID` (empty when unset or not unicode).
    pub fn current(edition: impl Into<String>) -> Self {
        let installation_id = std::env::var(INSTALLATION_ID_ENV).unwrap_or_default();
        if !installation_id.is_empty() {
            tracing::debug!(%installation_id, "cloud installation detected");
        }
        Self::new(env!("CARGO_PKG_VERSION"), BUILD_NUMBER, edition, installation_id)
    }

    pub fn has_installation_id(&self) -> bool {
        !self.installation_id.is_empty()
    }
}
