//! Configuration management for the wiki server.
//!
//! Parses `wiki.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## File Format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [wiki]
//! root_title = "FrontPage"
//! data_dir = "data"
//! templates_dir = "templates"   # optional, built-in templates when absent
//! ```
//!
//! Relative paths resolve against the directory holding the config file.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `wiki.data_dir`
//! - `wiki.templates_dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use wiki_page::Title;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override page data directory.
    pub data_dir: Option<PathBuf>,
    /// Override templates directory.
    pub templates_dir: Option<PathBuf>,
    /// Override root page title.
    pub root_title: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wiki.toml";

/// Title the bare root path redirects to by default.
pub const DEFAULT_ROOT_TITLE: &str = "FrontPage";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Wiki configuration (paths are relative strings from TOML).
    wiki: WikiConfigRaw,

    /// Resolved wiki configuration (set after loading).
    #[serde(skip)]
    pub wiki_resolved: WikiConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Raw wiki configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct WikiConfigRaw {
    root_title: Option<String>,
    data_dir: Option<String>,
    templates_dir: Option<String>,
}

/// Resolved wiki configuration with absolute paths.
#[derive(Debug)]
pub struct WikiConfig {
    /// Title `/` redirects to.
    pub root_title: String,
    /// Directory holding one `<title>.txt` file per page.
    pub data_dir: PathBuf,
    /// Directory with `view.html` and `edit.html` (`None` uses built-in templates).
    pub templates_dir: Option<PathBuf>,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            root_title: DEFAULT_ROOT_TITLE.to_owned(),
            data_dir: PathBuf::from("data"),
            templates_dir: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`wiki.data_dir`").
        field: String,
        /// Error message (e.g., "${`WIKI_DATA`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wiki.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated again after overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(data_dir) = &settings.data_dir {
            self.wiki_resolved.data_dir.clone_from(data_dir);
        }
        if let Some(templates_dir) = &settings.templates_dir {
            self.wiki_resolved.templates_dir = Some(templates_dir.clone());
        }
        if let Some(root_title) = &settings.root_title {
            self.wiki_resolved.root_title.clone_from(root_title);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            wiki: WikiConfigRaw::default(),
            wiki_resolved: WikiConfig {
                data_dir: base.join("data"),
                ..WikiConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically at the end of [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_wiki()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate wiki configuration.
    fn validate_wiki(&self) -> Result<(), ConfigError> {
        Title::parse(&self.wiki_resolved.root_title).map_err(|_| {
            ConfigError::Validation(format!(
                "wiki.root_title must be one or more ASCII letters or digits, got {:?}",
                self.wiki_resolved.root_title
            ))
        })?;

        if self.wiki_resolved.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "wiki.data_dir cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref dir) = self.wiki.data_dir {
            self.wiki.data_dir = Some(expand::expand_env(dir, "wiki.data_dir")?);
        }
        if let Some(ref dir) = self.wiki.templates_dir {
            self.wiki.templates_dir = Some(expand::expand_env(dir, "wiki.templates_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.wiki_resolved = WikiConfig {
            root_title: self
                .wiki
                .root_title
                .clone()
                .unwrap_or_else(|| DEFAULT_ROOT_TITLE.to_owned()),
            data_dir: config_dir.join(self.wiki.data_dir.as_deref().unwrap_or("data")),
            templates_dir: self
                .wiki
                .templates_dir
                .as_deref()
                .map(|dir| config_dir.join(dir)),
        };
    }
}
