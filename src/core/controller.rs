use crate::core::{EstadosView, GraphQlTransport, SelectOutcome};
use crate::utils::error::Result;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub const ESTADOS_QUERY: &str = "query { estados { sigla nome } }";
pub const CIDADES_QUERY: &str = "query ($sigla: String) { estado(sigla: $sigla) { cidades } }";

#[derive(Debug, Deserialize)]
struct EstadosData {
    estados: Vec<EstadoOption>,
}

#[derive(Debug, Deserialize)]
struct EstadoOption {
    sigla: Option<String>,
    nome: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EstadoData {
    estado: Vec<EstadoCidades>,
}

#[derive(Debug, Deserialize)]
struct EstadoCidades {
    #[serde(default)]
    cidades: Option<Vec<String>>,
}

/// Drives the state picker: fills the selection control once, then renders
/// the cities of whichever state is selected.
///
/// Every `select` takes a generation number. A response is applied only if
/// its generation is still the latest when it arrives, so a slow answer for
/// an earlier selection never overwrites a newer one.
pub struct PageController<T: GraphQlTransport, V: EstadosView> {
    transport: T,
    view: V,
    generation: AtomicU64,
}

impl<T: GraphQlTransport, V: EstadosView> PageController<T, V> {
    pub fn new(transport: T, view: V) -> Self {
        Self {
            transport,
            view,
            generation: AtomicU64::new(0),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Appends one option per state, in the order the endpoint returned them.
    pub async fn load(&self) -> Result<usize> {
        let data = self
            .transport
            .execute(ESTADOS_QUERY, serde_json::Value::Null)
            .await?;
        let EstadosData { estados } = serde_json::from_value(data)?;

        for estado in &estados {
            let sigla = estado.sigla.as_deref().unwrap_or_default();
            let nome = estado.nome.as_deref().unwrap_or(sigla);
            self.view.append_option(sigla, nome);
        }

        tracing::info!("Loaded {} states", estados.len());
        Ok(estados.len())
    }

    pub async fn select(&self, sigla: &str) -> Result<SelectOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Selecting {} (generation {})", sigla, generation);

        let data = self
            .transport
            .execute(CIDADES_QUERY, serde_json::json!({ "sigla": sigla }))
            .await?;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale response for {} (generation {})", sigla, generation);
            return Ok(SelectOutcome::Stale);
        }

        let EstadoData { estado } = serde_json::from_value(data)?;
        if estado.len() > 1 {
            tracing::warn!(
                "{} records returned for sigla {}, rendering the first",
                estado.len(),
                sigla
            );
        }

        self.view.clear_cidades();
        let Some(first) = estado.into_iter().next() else {
            tracing::info!("No state found for sigla {}", sigla);
            return Ok(SelectOutcome::NotFound);
        };

        let cidades = first.cidades.unwrap_or_default();
        for cidade in &cidades {
            self.view.append_cidade(cidade);
        }
        Ok(SelectOutcome::Rendered(cidades.len()))
    }
}
