//! Loading `DungeonConfig` overrides from TOML or JSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use dungeon::DungeonConfig;

/// Reads a config file, picking the format from the extension. Missing fields keep
/// their defaults; the result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<DungeonConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: DungeonConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
        _ => bail!("Unsupported config format for {} (expected .toml or .json)", path.display()),
    };

    config.validate().with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}
