use crate::core::{ConfigProvider, Estado, EstadosSource};
use crate::utils::error::{EstadosError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

/// `EstadosSource` backed by the upstream REST API.
///
/// `GET <endpoint>` lists every state, `GET <endpoint>?sigla=<code>` filters
/// by code. The body is expected to be a JSON array of [`Estado`] records and
/// is returned in upstream order.
#[derive(Debug, Clone)]
pub struct RestEstadosSource {
    client: Client,
    endpoint: String,
}

impl RestEstadosSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in config.upstream_headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                EstadosError::InvalidConfigValueError {
                    field: "upstream.headers".to_string(),
                    value: name.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            let header_value = HeaderValue::from_str(&value).map_err(|e| {
                EstadosError::InvalidConfigValueError {
                    field: format!("upstream.headers.{}", name),
                    value: value.clone(),
                    reason: format!("Invalid header value: {}", e),
                }
            })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.upstream_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.upstream_endpoint().to_string(),
        })
    }

    async fn fetch(&self, query: &[(&str, &str)]) -> Result<Vec<Estado>> {
        tracing::debug!("Requesting upstream: {} {:?}", self.endpoint, query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(query)
            .send()
            .await
            .inspect_err(|e| tracing::error!("Upstream request to {} failed: {}", self.endpoint, e))?;

        let status = response.status();
        let url = response.url().to_string();
        tracing::debug!("Upstream response status: {}", status);

        if !status.is_success() {
            tracing::error!("Upstream {} answered with status {}", url, status);
            return Err(EstadosError::UpstreamStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        let estados: Vec<Estado> = serde_json::from_slice(&body)
            .inspect_err(|e| tracing::error!("Upstream {} returned a malformed body: {}", url, e))?;

        tracing::debug!("Upstream returned {} records", estados.len());
        Ok(estados)
    }
}

#[async_trait]
impl EstadosSource for RestEstadosSource {
    async fn list_estados(&self) -> Result<Vec<Estado>> {
        self.fetch(&[]).await
    }

    async fn find_estado(&self, sigla: &str) -> Result<Vec<Estado>> {
        self.fetch(&[("sigla", sigla)]).await
    }
}
