//! CLI configuration loaded from TOML

use std::path::Path;

use anyhow::{Context, Result};
use itc_core::DecodeLimits;
use serde::{Deserialize, Serialize};

/// Text encoding used to print and read binary stamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryEncoding {
    /// Lowercase hexadecimal
    #[default]
    Hex,
    /// Standard base64 with padding
    Base64,
}

/// Settings for the `itc` tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Encoding for `encode` output and `decode` input
    pub encoding: BinaryEncoding,
    /// Bounds applied when reading stamps
    pub limits: DecodeLimits,
}

/// Load configuration from `path`, falling back to defaults if it is absent
pub fn load_config(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(CliConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: CliConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config
        .limits
        .validate()
        .with_context(|| format!("Invalid limits in {}", path.display()))?;

    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}
