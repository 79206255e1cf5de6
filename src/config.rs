//! Configuration management for the file storage server
//!
//! Loaded once at startup from `config.toml` with `FILE_STORAGE_*` environment
//! overrides. Nothing here changes while the server is running.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

const ENV_PREFIX: &str = "FILE_STORAGE";

/// Complete server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    // ═══ NETWORK ═══
    /// IP address to bind the HTTP listener
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port for the HTTP listener
    #[serde(default = "default_port")]
    pub port: u16,

    // ═══ STORAGE ═══
    /// Directory all served files live under
    #[serde(default = "default_storage_root")]
    pub storage_root: String,

    /// First path segment of the file route, e.g. `file-storage`
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// Base URL clients reach the server at, used to build public file URLs
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Optional path of a symlink to create pointing at the storage root
    #[serde(default)]
    pub public_link: Option<String>,

    // ═══ ACCESS ═══
    /// Whether the file route requires a valid token
    #[serde(default)]
    pub require_auth: bool,

    /// Shared token accepted via `X-Api-Key` or `Authorization: Bearer`
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage_root() -> String {
    "./storage/app/public".to_string()
}

fn default_route_prefix() -> String {
    "file-storage".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            storage_root: default_storage_root(),
            route_prefix: default_route_prefix(),
            public_base_url: default_public_base_url(),
            public_link: None,
            require_auth: false,
            api_token: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from ./config.toml (optional) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the given file stem (optional) with environment overrides
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.storage_root.is_empty() {
            return Err(config::ConfigError::Message(
                "storage_root cannot be empty".into(),
            ));
        }

        if self.route_prefix.is_empty() || self.route_prefix.contains(['/', '\\']) {
            return Err(config::ConfigError::Message(
                "route_prefix must be a single non-empty path segment".into(),
            ));
        }

        if let Err(e) = Url::parse(&self.public_base_url) {
            return Err(config::ConfigError::Message(format!(
                "public_base_url is not a valid URL: {e}"
            )));
        }

        if self.require_auth
            && self
                .api_token
                .as_deref()
                .is_none_or(|token| token.trim().is_empty())
        {
            return Err(config::ConfigError::Message(
                "api_token must be set when require_auth is enabled".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get storage root as PathBuf
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }

    /// Get the public base URL. Only valid after `validate` has passed.
    pub fn public_base(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.public_base_url)
    }
}
