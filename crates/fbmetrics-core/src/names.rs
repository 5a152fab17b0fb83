//! Metric namespace, subsystems, and label names.
//!
//! These strings are part of the exposition contract: dashboards and alerts
//! query by them, so they must not change.

pub const NAMESPACE: &str = "focalboard";

pub const SUBSYSTEM_BLOCKS: &str = "blocks";
pub const SUBSYSTEM_WORKSPACES: &str = "workspaces";
pub const SUBSYSTEM_SYSTEM: &str = "system";
pub const SUBSYSTEM_RUNTIME: &str = "runtime";

/// Constant label attached to every family for cloud installations.
pub const INSTALLATION_LABEL: &str = "installationId";

/// Environment variable holding the cloud installation identifier.
pub const INSTALLATION_ID_ENV: &str = "MM_CLOUD_INSTALLATION_ID";

pub const LABEL_VERSION: &str = "Version";
pub const LABEL_BUILD_NUM: &str = "BuildNum";
pub const LABEL_EDITION: &str = "Edition";
pub const LABEL_BLOCK_TYPE: &str = "BlockType";
