use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default server address, matching the server's default port.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4777";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Client configuration from `~/.config/taskdeck/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub server_url: Option<String>,
}

impl ClientConfig {
    pub fn load_from(path: &Path) -> Result<ClientConfig, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(toml::from_str(&text)?)
    }
}

/// Path of the user config file, if a home directory can be determined.
fn config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("taskdeck")
            .join("config.toml"),
    )
}

/// Resolve the server URL: `--server` flag, then `TASKDECK_SERVER`, then
/// the config file, then the default. A missing or broken config file is
/// not an error here; an explicit flag or env value always wins.
pub fn resolve_server_url(flag: Option<&str>) -> String {
    if let Some(url) = flag {
        return url.trim_end_matches('/').to_string();
    }
    if let Ok(url) = std::env::var("TASKDECK_SERVER")
        && !url.is_empty()
    {
        return url.trim_end_matches('/').to_string();
    }
    if let Some(path) = config_path()
        && let Ok(config) = ClientConfig::load_from(&path)
        && let Some(url) = config.server_url
    {
        return url.trim_end_matches('/').to_string();
    }
    DEFAULT_SERVER_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flag_wins_and_is_normalized() {
        assert_eq!(
            resolve_server_url(Some("http://dev.local:9000/")),
            "http://dev.local:9000"
        );
    }

    #[test]
    fn test_config_file_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server_url = \"http://10.0.0.5:4777\"\n").unwrap();
        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.server_url.as_deref(), Some("http://10.0.0.5:4777"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            ClientConfig::load_from(&path),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn test_empty_config_has_no_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();
        let config = ClientConfig::load_from(&path).unwrap();
        assert!(config.server_url.is_none());
    }
}
