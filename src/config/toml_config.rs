use crate::config::{DEFAULT_GRAPHQL_PATH, DEFAULT_LISTEN_ADDR};
use crate::core::ConfigProvider;
use crate::utils::error::{EstadosError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    pub upstream: UpstreamSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub listen_addr: Option<String>,
    pub graphql_path: Option<String>,
    pub playground: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSection {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
}

const LOG_FORMATS: [&str; 2] = ["compact", "json"];

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstadosError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text, after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EstadosError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EstadosError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("upstream.endpoint", &self.upstream.endpoint)?;
        validation::validate_socket_addr("server.listen_addr", self.listen_addr())?;
        validation::validate_route_path("server.graphql_path", self.graphql_path())?;

        if let Some(timeout) = self.upstream.timeout_seconds {
            validation::validate_positive_number("upstream.timeout_seconds", timeout, 1)?;
        }

        if let Some(logging) = &self.logging {
            if let Some(level) = &logging.level {
                validation::validate_log_level("logging.level", level)?;
            }
            if let Some(format) = &logging.format {
                if !LOG_FORMATS.contains(&format.as_str()) {
                    return Err(EstadosError::InvalidConfigValueError {
                        field: "logging.format".to_string(),
                        value: format.clone(),
                        reason: format!(
                            "Unsupported format. Valid formats: {}",
                            LOG_FORMATS.join(", ")
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn upstream_endpoint(&self) -> &str {
        &self.upstream.endpoint
    }

    fn listen_addr(&self) -> &str {
        self.server.listen_addr.as_deref().unwrap_or(DEFAULT_LISTEN_ADDR)
    }

    fn graphql_path(&self) -> &str {
        self.server
            .graphql_path
            .as_deref()
            .unwrap_or(DEFAULT_GRAPHQL_PATH)
    }

    fn playground_enabled(&self) -> bool {
        self.server.playground.unwrap_or(true)
    }

    fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream.timeout_seconds.map(Duration::from_secs)
    }

    fn upstream_headers(&self) -> Vec<(String, String)> {
        self.upstream
            .headers
            .as_ref()
            .map(|headers| {
                headers
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
