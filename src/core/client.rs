use crate::core::schema::EstadosSchema;
use crate::core::GraphQlTransport;
use crate::utils::error::{EstadosError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct GraphQlRequestBody<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponseBody {
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorBody {
    message: String,
}

impl GraphQlResponseBody {
    fn into_data(self) -> Result<serde_json::Value> {
        if !self.errors.is_empty() {
            return Err(EstadosError::GraphQl {
                messages: self.errors.into_iter().map(|e| e.message).collect(),
            });
        }
        match self.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(EstadosError::GraphQl {
                messages: vec!["response carried no data".to_string()],
            }),
        }
    }
}

/// Posts `{query, variables}` to a GraphQL endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
}

impl GraphQlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl GraphQlTransport for GraphQlClient {
    async fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value> {
        tracing::debug!("Posting GraphQL query to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequestBody { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EstadosError::UpstreamStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body: GraphQlResponseBody = serde_json::from_slice(&response.bytes().await?)?;
        body.into_data()
    }
}

/// Runs queries in-process against a schema, skipping the HTTP hop.
#[derive(Clone)]
pub struct SchemaTransport {
    schema: EstadosSchema,
}

impl SchemaTransport {
    pub fn new(schema: EstadosSchema) -> Self {
        Self { schema }
    }
}

#[async_trait]
impl GraphQlTransport for SchemaTransport {
    async fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let request = async_graphql::Request::new(query)
            .variables(async_graphql::Variables::from_json(variables));
        let response = self.schema.execute(request).await;

        let body = GraphQlResponseBody {
            data: Some(response.data.into_json()?),
            errors: response
                .errors
                .into_iter()
                .map(|e| GraphQlErrorBody { message: e.message })
                .collect(),
        };
        body.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_posts_query_and_variables() {
        let server = MockServer::start();
        let gql_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/graphql")
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "query": "query ($sigla: String) { estado(sigla: $sigla) { cidades } }",
                    "variables": {"sigla": "SP"}
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "data": {"estado": [{"cidades": ["Campinas", "Santos"]}]}
                }));
        });

        let client = GraphQlClient::new(server.url("/graphql"));
        let data = client
            .execute(
                "query ($sigla: String) { estado(sigla: $sigla) { cidades } }",
                serde_json::json!({"sigla": "SP"}),
            )
            .await
            .unwrap();

        gql_mock.assert();
        assert_eq!(data["estado"][0]["cidades"][1], "Santos");
    }

    #[tokio::test]
    async fn test_graphql_errors_become_typed_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "data": null,
                    "errors": [{"message": "Could not reach the states data service"}]
                }));
        });

        let client = GraphQlClient::new(server.url("/graphql"));
        let err = client
            .execute("{ estados { sigla } }", serde_json::Value::Null)
            .await
            .unwrap_err();

        match err {
            EstadosError::GraphQl { messages } => {
                assert_eq!(messages, vec!["Could not reach the states data service"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_failure_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(500);
        });

        let client = GraphQlClient::new(server.url("/graphql"));
        let err = client
            .execute("{ estados { sigla } }", serde_json::Value::Null)
            .await
            .unwrap_err();

        assert!(matches!(err, EstadosError::UpstreamStatus { status: 500, .. }));
    }
}
