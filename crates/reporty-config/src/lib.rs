//! Configuration management for reporty
//!
//! This module handles loading, validation, and management of
//! reporty configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// A user allowed to sign in to the admin area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredential {
    pub username: String,
    pub password: String,
}

/// Login and session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Where unauthenticated requests are sent
    #[serde(default = "default_login_url")]
    pub login_url: String,
    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in minutes
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u32,
    /// Accounts allowed to sign in
    #[serde(default)]
    pub users: Vec<UserCredential>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            cookie_name: default_cookie_name(),
            session_ttl_minutes: default_session_ttl(),
            users: Vec::new(),
        }
    }
}

fn default_login_url() -> String {
    "/admin/login/".to_string()
}

fn default_cookie_name() -> String {
    "reporty_session".to_string()
}

fn default_session_ttl() -> u32 {
    120
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection url, e.g. `sqlite://reporty.db`
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Upper bound of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Create the user tables on startup when they are missing
    #[serde(default = "default_true")]
    pub create_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            create_schema: true,
        }
    }
}

fn default_database_url() -> String {
    "sqlite://reporty.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

/// Report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Filter values handed to every report run
    #[serde(default = "default_filters")]
    pub filters: BTreeMap<String, String>,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            filters: default_filters(),
        }
    }
}

fn default_filters() -> BTreeMap<String, String> {
    let mut filters = BTreeMap::new();
    filters.insert("email".to_string(), "admin@example.com".to_string());
    filters
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Login settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Report settings
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if !self.auth.login_url.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "auth.login_url".to_string(),
                reason: "Login url must be an absolute path".to_string(),
            });
        }

        if is_reserved_path(&self.auth.login_url) {
            return Err(ConfigError::InvalidValue {
                field: "auth.login_url".to_string(),
                reason: format!("Login url {} collides with a built-in route", self.auth.login_url),
            });
        }

        if self.auth.cookie_name.is_empty() {
            return Err(ConfigError::MissingField {
                field: "auth.cookie_name".to_string(),
            });
        }

        if self.auth.session_ttl_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.session_ttl_minutes".to_string(),
                reason: "Session lifetime must be greater than 0".to_string(),
            });
        }

        if self.auth.users.is_empty() {
            return Err(ConfigError::MissingField {
                field: "auth.users".to_string(),
            });
        }

        if self.auth.users.iter().any(|u| u.username.is_empty()) {
            return Err(ConfigError::ValidationError {
                message: "Usernames must not be empty".to_string(),
            });
        }

        if self.database.url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections".to_string(),
                reason: "At least one connection is required".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Paths served by built-in routes
const RESERVED_PATHS: &[&str] = &["/", "/admin/logout/", "/api/health", "/api/reports"];

/// Whether `path` would clash with a built-in route or contain route syntax
fn is_reserved_path(path: &str) -> bool {
    RESERVED_PATHS.contains(&path)
        || path.starts_with("/admin/reports")
        || path.contains(|c: char| c == ':' || c == '*' || c == '{' || c == '}')
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigErrorCode;

    const MINIMAL: &str = r#"
auth:
  users:
    - username: admin
      password: secret
"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.auth.login_url, "/admin/login/");
        assert_eq!(config.auth.cookie_name, "reporty_session");
        assert_eq!(config.database.url, "sqlite://reporty.db");
        assert_eq!(config.reports.filters.get("email").map(String::as_str), Some("admin@example.com"));
        assert_eq!(config.bind_address(), "0.0.0.0:8081");
    }

    #[test]
    fn test_generated_default_is_valid() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert!(!config.auth.users.is_empty());
        assert!(config.database.create_schema);
    }

    #[test]
    fn test_missing_users_rejected() {
        let err = Config::from_yaml("server:\n  port: 9000\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::MissingField);
    }

    #[test]
    fn test_zero_port_rejected() {
        let yaml = format!("server:\n  port: 0\n{}", MINIMAL);
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "server.port"));
    }

    #[test]
    fn test_relative_login_url_rejected() {
        let yaml = format!("{}  login_url: login\n", MINIMAL);
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "auth.login_url"));
    }

    #[test]
    fn test_login_url_on_builtin_route_rejected() {
        for url in ["/admin/reports/", "/admin/reports/email/", "/admin/logout/", "/api/health", "/", "/login/:id"] {
            let yaml = format!("{}  login_url: \"{}\"\n", MINIMAL, url);
            let err = Config::from_yaml(&yaml).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "auth.login_url"),
                "{} should be rejected",
                url
            );
        }

        let yaml = format!("{}  login_url: /accounts/login/\n", MINIMAL);
        assert_eq!(Config::from_yaml(&yaml).unwrap().auth.login_url, "/accounts/login/");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [unclosed").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
        assert!(err.to_string().starts_with("Invalid YAML format: "));
        assert!(err.to_string().len() > "Invalid YAML format: ".len());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(PathBuf::from("/definitely/not/here.yaml")).unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
    }
}
