use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use termtable_engine::TableConfig;

pub const CONFIG_ENV: &str = "TERMTABLE_CONFIG";

/// Config file location, by priority:
/// 1. Explicit `--config` path
/// 2. TERMTABLE_CONFIG environment variable
/// 3. <config dir>/termtable/config.toml
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(env_path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(env_path));
    }

    dirs::config_dir().map(|dir| dir.join("termtable").join("config.toml"))
}

/// Load the resolved config. An explicit path must exist; the implicit
/// locations fall back to defaults when absent.
pub fn load(explicit: Option<&Path>) -> Result<TableConfig> {
    if let Some(path) = explicit
        && !path.exists()
    {
        bail!("config file not found: {}", path.display());
    }

    let Some(path) = resolve_config_path(explicit) else {
        return Ok(TableConfig::default());
    };

    tracing::debug!(path = %path.display(), "loading config");
    TableConfig::load_from(&path)
        .with_context(|| format!("Failed to load config: {}", path.display()))
}
