use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "MODTIME_CONFIG";

/// Resolve the configuration file path based on priority:
/// 1. Explicit path (`--config`)
/// 2. MODTIME_CONFIG environment variable
/// 3. User config directory (`<config dir>/modtime/config.toml`)
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(expand_tilde(path));
    }

    if let Some(env_path) = std::env::var_os(CONFIG_ENV) {
        return Some(expand_tilde(Path::new(&env_path)));
    }

    dirs::config_dir().map(|dir| dir.join("modtime").join("config.toml"))
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    path.to_path_buf()
}

/// Defaults for the command line options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub permissive: bool,
    /// Negative means no limit
    pub max_events: Option<i64>,
    pub check_duplicates: bool,
    pub max_columns: Option<usize>,
    pub precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            permissive: false,
            max_events: None,
            check_duplicates: true,
            max_columns: None,
            precision: modtime_engine::DEFAULT_PRECISION,
        }
    }
}

impl Config {
    /// Loads the configuration from the resolved location.
    ///
    /// An explicitly requested file must exist; the implicit locations fall
    /// back to the defaults when absent.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let Some(path) = resolve_config_path(explicit_path) else {
            return Ok(Self::default());
        };
        if explicit_path.is_some() && !path.exists() {
            bail!("configuration file '{}' not found", path.display());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration '{}'", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid configuration '{}'", path.display()))?;
        tracing::debug!("loaded configuration from '{}'", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.check_duplicates);
        assert_eq!(config.precision, 6);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "permissive = true\nmax_columns = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.permissive);
        assert_eq!(config.max_columns, Some(5));
        assert!(config.check_duplicates);
        assert_eq!(config.max_events, None);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "permissive = \"maybe\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("/tmp/modtime-explicit.toml");
        assert_eq!(resolve_config_path(Some(path)), Some(path.to_path_buf()));
    }
}
