//! GraphQL schema proxying the upstream REST API.
//!
//! ```graphql
//! { estados { sigla nome } }
//! { estado(sigla: "SP") { cidades } }
//! ```
//!
//! Both root fields return the decoded upstream array verbatim. Upstream
//! failures come back as GraphQL errors carrying `extensions.code`.

use crate::core::{Estado, EstadosSource};
use crate::utils::error::EstadosError;
use async_graphql::{Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, Schema};
use std::sync::Arc;

pub type EstadosSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Shared handle to the upstream, stored in the schema data.
pub type SharedSource = Arc<dyn EstadosSource>;

pub fn build_schema(source: SharedSource) -> EstadosSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(source)
        .finish()
}

pub struct QueryRoot;

#[Object(name = "RootQueryType")]
impl QueryRoot {
    /// Every state known upstream, in upstream order.
    async fn estados(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Estado>> {
        let source = ctx.data::<SharedSource>()?;
        source.list_estados().await.map_err(|e| e.extend())
    }

    /// States matching `sigla`. Usually zero or one record, but upstream does not promise that.
    async fn estado(
        &self,
        ctx: &Context<'_>,
        sigla: Option<String>,
    ) -> async_graphql::Result<Vec<Estado>> {
        let Some(sigla) = sigla else {
            tracing::warn!("estado query without sigla rejected");
            return Err(EstadosError::MissingArgument {
                argument: "sigla".to_string(),
            }
            .extend());
        };

        let source = ctx.data::<SharedSource>()?;
        source.find_estado(&sigla).await.map_err(|e| e.extend())
    }
}

#[Object]
impl Estado {
    async fn sigla(&self) -> Option<&str> {
        self.sigla.as_deref()
    }

    async fn nome(&self) -> Option<&str> {
        self.nome.as_deref()
    }

    async fn capital(&self) -> Option<&str> {
        self.capital.as_deref()
    }

    async fn cidades(&self) -> Option<&Vec<String>> {
        self.cidades.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSource {
        estados: Vec<Estado>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                estados: vec![
                    Estado {
                        sigla: Some("SP".to_string()),
                        nome: Some("São Paulo".to_string()),
                        capital: Some("São Paulo".to_string()),
                        cidades: Some(vec!["Campinas".to_string(), "Santos".to_string()]),
                    },
                    Estado {
                        sigla: Some("MG".to_string()),
                        nome: Some("Minas Gerais".to_string()),
                        capital: Some("Belo Horizonte".to_string()),
                        cidades: Some(vec!["Uberlândia".to_string()]),
                    },
                ],
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EstadosSource for FakeSource {
        async fn list_estados(&self) -> Result<Vec<Estado>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.estados.clone())
        }

        async fn find_estado(&self, sigla: &str) -> Result<Vec<Estado>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .estados
                .iter()
                .filter(|e| e.sigla.as_deref() == Some(sigla))
                .cloned()
                .collect())
        }
    }

    struct DownSource;

    #[async_trait]
    impl EstadosSource for DownSource {
        async fn list_estados(&self) -> Result<Vec<Estado>> {
            Err(EstadosError::UpstreamStatus {
                status: 503,
                url: "http://upstream/estados".to_string(),
            })
        }

        async fn find_estado(&self, _sigla: &str) -> Result<Vec<Estado>> {
            self.list_estados().await
        }
    }

    #[tokio::test]
    async fn test_estados_returns_selected_fields() {
        let schema = build_schema(Arc::new(FakeSource::new()));

        let response = schema.execute("{ estados { sigla nome } }").await;

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data.into_json().unwrap(),
            serde_json::json!({
                "estados": [
                    {"sigla": "SP", "nome": "São Paulo"},
                    {"sigla": "MG", "nome": "Minas Gerais"}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_estado_filters_by_sigla() {
        let schema = build_schema(Arc::new(FakeSource::new()));

        let response = schema
            .execute(r#"{ estado(sigla: "MG") { sigla capital cidades } }"#)
            .await;

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data.into_json().unwrap(),
            serde_json::json!({
                "estado": [{"sigla": "MG", "capital": "Belo Horizonte", "cidades": ["Uberlândia"]}]
            })
        );
    }

    #[tokio::test]
    async fn test_every_query_refetches() {
        let source = Arc::new(FakeSource::new());
        let schema = build_schema(source.clone());

        schema.execute("{ estados { sigla } }").await;
        schema.execute("{ estados { sigla } }").await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_estado_without_sigla_is_bad_user_input() {
        let source = Arc::new(FakeSource::new());
        let schema = build_schema(source.clone());

        let response = schema.execute("{ estado { cidades } }").await;

        assert_eq!(response.errors.len(), 1);
        let extensions = response.errors[0].extensions.as_ref().unwrap();
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("BAD_USER_INPUT"))
        );
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces_typed_error() {
        let schema = build_schema(Arc::new(DownSource));

        let response = schema.execute("{ estados { sigla } }").await;

        assert_eq!(response.errors.len(), 1);
        let error = &response.errors[0];
        let extensions = error.extensions.as_ref().unwrap();
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("UPSTREAM_STATUS"))
        );
        assert!(error.message.contains("503"));
    }

    #[test]
    fn test_sdl_exposes_both_root_fields() {
        let schema = build_schema(Arc::new(FakeSource::new()));
        let sdl = schema.sdl();

        assert!(sdl.contains("estados: [Estado!]!"));
        assert!(sdl.contains("estado(sigla: String): [Estado!]!"));
        assert!(sdl.contains("cidades: [String!]"));
    }
}
