use crate::domain::model::Estado;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Source of state records. Every call goes to the source of record; nothing is cached.
#[async_trait]
pub trait EstadosSource: Send + Sync {
    async fn list_estados(&self) -> Result<Vec<Estado>>;
    async fn find_estado(&self, sigla: &str) -> Result<Vec<Estado>>;
}

pub trait ConfigProvider: Send + Sync {
    fn upstream_endpoint(&self) -> &str;
    fn listen_addr(&self) -> &str;
    fn graphql_path(&self) -> &str;
    fn playground_enabled(&self) -> bool;

    /// `None` leaves the HTTP client defaults in place.
    fn upstream_timeout(&self) -> Option<Duration> {
        None
    }

    fn upstream_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Executes a GraphQL document and hands back the `data` member of the response.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn execute(&self, query: &str, variables: serde_json::Value)
        -> Result<serde_json::Value>;
}

/// The page the controller drives: a selection control and a city container.
pub trait EstadosView: Send + Sync {
    fn append_option(&self, sigla: &str, nome: &str);
    fn clear_cidades(&self);
    fn append_cidade(&self, cidade: &str);
}
