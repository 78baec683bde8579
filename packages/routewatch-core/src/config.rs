use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Environment variable name for controller URL override
const ENV_CONTROLLER_URL: &str = "ROUTEWATCH_CONTROLLER_URL";

/// Configuration file structure
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    controller: Option<ControllerConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct ControllerConfig {
    /// Controller base URL (e.g., "https://192.168.0.1")
    url: Option<String>,
    /// Whether to validate the controller's TLS certificate.
    /// Controllers commonly ship self-signed certificates, so operators can
    /// opt out explicitly. Defaults to true.
    verify_tls: Option<bool>,
}

/// Resolved controller endpoint configuration
#[derive(Debug, Clone)]
pub struct ControllerEndpointConfig {
    /// Controller base URL, if one was configured
    pub url: Option<String>,
    /// Whether TLS certificate validation is enabled
    pub verify_tls: bool,
    /// Source of the URL (for logging)
    pub source: ConfigSource,
}

/// Where the configuration came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigSource {
    /// No URL configured anywhere; the caller must supply one
    Unset,
    /// Loaded from environment variable
    Environment,
    /// Loaded from config file
    ConfigFile,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Unset => write!(f, "not configured"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::ConfigFile => write!(f, "config file"),
        }
    }
}

/// Trim whitespace and any trailing slashes from a base URL so endpoint
/// paths can be joined with a single `/`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Get the path to the configuration file
fn get_config_file_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .map(|p| p.join("routewatch").join("config.toml"))
}

/// Load configuration from the config file
fn load_config_file() -> Option<ConfigFile> {
    let path = get_config_file_path()?;

    if !path.exists() {
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                None
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read config file {:?}: {}", path, e);
            None
        }
    }
}

/// Load controller endpoint configuration with priority:
/// 1. Environment variable (ROUTEWATCH_CONTROLLER_URL)
/// 2. Config file (~/.config/routewatch/config.toml)
///
/// A `--controller-url` CLI flag, when present, outranks both; the CLI
/// applies it on top of what this returns. `verify_tls` only comes from the
/// config file (or an explicit CLI flag) and defaults to true.
pub fn load_controller_config() -> ControllerEndpointConfig {
    let file = load_config_file();
    let verify_tls = file
        .as_ref()
        .and_then(|f| f.controller.as_ref())
        .and_then(|c| c.verify_tls)
        .unwrap_or(true);

    // Priority 1: Environment variable
    if let Ok(url) = std::env::var(ENV_CONTROLLER_URL) {
        let url = normalize_base_url(&url);
        if !url.is_empty() {
            tracing::info!("Using controller URL from environment variable: {}", url);
            return ControllerEndpointConfig {
                url: Some(url),
                verify_tls,
                source: ConfigSource::Environment,
            };
        }
    }

    // Priority 2: Config file
    if let Some(config) = file {
        if let Some(controller) = config.controller {
            let url = controller
                .url
                .map(|u| normalize_base_url(&u))
                .filter(|u| !u.is_empty());

            if let Some(url) = url {
                tracing::info!("Using controller URL from config file: {}", url);
                return ControllerEndpointConfig {
                    url: Some(url),
                    verify_tls,
                    source: ConfigSource::ConfigFile,
                };
            }
        }
    }

    ControllerEndpointConfig {
        url: None,
        verify_tls,
        source: ConfigSource::Unset,
    }
}

/// Get the path to the config file for documentation purposes
pub fn get_config_file_path_string() -> String {
    get_config_file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "~/.config/routewatch/config.toml".to_string())
}

/// Generate example config file content
pub fn generate_example_config() -> String {
    r#"# Routewatch Configuration
# Place this file at: ~/.config/routewatch/config.toml

[controller]
# Controller base URL
# url = "https://192.168.0.1"

# Validate the controller's TLS certificate (default: true).
# Set to false only for controllers with self-signed certificates.
# verify_tls = true
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("https://192.168.0.1/"), "https://192.168.0.1");
        assert_eq!(normalize_base_url("https://192.168.0.1"), "https://192.168.0.1");
        assert_eq!(
            normalize_base_url("  https://conductor.example.com//  "),
            "https://conductor.example.com"
        );
        assert_eq!(normalize_base_url("   "), "");
    }

    #[test]
    fn test_example_config_parses() {
        let example = generate_example_config();
        let parsed: ConfigFile = toml::from_str(&example).unwrap();
        // All keys in the example are commented out
        assert!(parsed.controller.is_none());
    }

    #[test]
    fn test_config_file_fields() {
        let content = r#"
            [controller]
            url = "https://10.0.0.5/"
            verify_tls = false
        "#;
        let parsed: ConfigFile = toml::from_str(content).unwrap();
        let controller = parsed.controller.unwrap();
        assert_eq!(controller.url.as_deref(), Some("https://10.0.0.5/"));
        assert_eq!(controller.verify_tls, Some(false));
    }
}
