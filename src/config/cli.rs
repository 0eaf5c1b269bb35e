use crate::config::{DEFAULT_GRAPHQL_PATH, DEFAULT_LISTEN_ADDR, DEFAULT_UPSTREAM_ENDPOINT};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "estados-cidades")]
#[command(about = "GraphQL endpoint for the states and cities REST API")]
pub struct ServerConfig {
    #[arg(long, default_value = DEFAULT_UPSTREAM_ENDPOINT)]
    pub upstream_endpoint: String,

    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    #[arg(long, default_value = DEFAULT_GRAPHQL_PATH)]
    pub graphql_path: String,

    #[arg(long, help = "Upstream request timeout in seconds (client default when omitted)")]
    pub upstream_timeout: Option<u64>,

    #[arg(long, help = "Disable the GraphiQL explorer on GET")]
    pub no_playground: bool,

    #[arg(short, long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Print the GraphQL schema (SDL) and exit")]
    pub print_schema: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            upstream_endpoint: DEFAULT_UPSTREAM_ENDPOINT.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            graphql_path: DEFAULT_GRAPHQL_PATH.to_string(),
            upstream_timeout: None,
            no_playground: false,
            config: None,
            print_schema: false,
            verbose: false,
            json_logs: false,
        }
    }
}

impl ConfigProvider for ServerConfig {
    fn upstream_endpoint(&self) -> &str {
        &self.upstream_endpoint
    }

    fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    fn graphql_path(&self) -> &str {
        &self.graphql_path
    }

    fn playground_enabled(&self) -> bool {
        !self.no_playground
    }

    fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout.map(Duration::from_secs)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("upstream_endpoint", &self.upstream_endpoint)?;
        validation::validate_socket_addr("listen_addr", &self.listen_addr)?;
        validation::validate_route_path("graphql_path", &self.graphql_path)?;
        if let Some(timeout) = self.upstream_timeout {
            validation::validate_positive_number("upstream_timeout", timeout, 1)?;
        }
        Ok(())
    }
}
