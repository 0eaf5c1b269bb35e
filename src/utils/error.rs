use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstadosError {
    #[error("Upstream request failed: {0}")]
    UpstreamRequest(#[from] reqwest::Error),

    #[error("Upstream {url} answered with status {status}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Malformed upstream body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("GraphQL request failed: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    #[error("Missing required argument: {argument}")]
    MissingArgument { argument: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Client,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstadosError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EstadosError::UpstreamRequest(_) => ErrorCategory::Network,
            EstadosError::UpstreamStatus { .. } | EstadosError::MalformedBody(_) => {
                ErrorCategory::Upstream
            }
            EstadosError::GraphQl { .. } | EstadosError::MissingArgument { .. } => {
                ErrorCategory::Client
            }
            EstadosError::ConfigValidationError { .. }
            | EstadosError::InvalidConfigValueError { .. }
            | EstadosError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EstadosError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Client => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Stable machine-readable code reported in GraphQL `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            EstadosError::UpstreamRequest(_) => "UPSTREAM_UNAVAILABLE",
            EstadosError::UpstreamStatus { .. } => "UPSTREAM_STATUS",
            EstadosError::MalformedBody(_) => "UPSTREAM_MALFORMED",
            EstadosError::MissingArgument { .. } => "BAD_USER_INPUT",
            _ => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EstadosError::UpstreamRequest(_) => {
                "Check that the upstream REST API is running and reachable"
            }
            EstadosError::UpstreamStatus { .. } => {
                "Inspect the upstream REST API logs for the failing request"
            }
            EstadosError::MalformedBody(_) => {
                "The upstream must return a JSON array of {sigla, nome, capital, cidades}"
            }
            EstadosError::GraphQl { .. } => "Check the GraphQL endpoint address and server logs",
            EstadosError::MissingArgument { .. } => "Provide every required query argument",
            EstadosError::IoError(_) => "Check file permissions and available resources",
            EstadosError::ConfigValidationError { .. }
            | EstadosError::InvalidConfigValueError { .. }
            | EstadosError::MissingConfigError { .. } => {
                "Fix the configuration file or command line flags and restart"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EstadosError::UpstreamRequest(_) => {
                "Could not reach the states data service".to_string()
            }
            EstadosError::UpstreamStatus { status, .. } => {
                format!("The states data service answered with status {}", status)
            }
            EstadosError::MalformedBody(_) => {
                "The states data service returned unexpected data".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ErrorExtensions for EstadosError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.user_friendly_message()).extend_with(|_, e| {
            e.set("code", self.code());
            if let EstadosError::UpstreamStatus { status, .. } = self {
                e.set("status", i32::from(*status));
            }
        })
    }
}

pub type Result<T> = std::result::Result<T, EstadosError>;
