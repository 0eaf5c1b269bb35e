use serde::{Deserialize, Serialize};

/// A state record as served by the upstream REST API.
///
/// Every attribute is optional so a record missing one of them still decodes;
/// the gap shows up as `null` in the GraphQL response instead of failing the
/// whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estado {
    #[serde(default)]
    pub sigla: Option<String>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub cidades: Option<Vec<String>>,
}

/// Outcome of applying a selection to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The city list now shows this many entries.
    Rendered(usize),
    /// Upstream had no record for the code; the city list was cleared.
    NotFound,
    /// A newer selection started while this one was in flight; nothing was applied.
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_record() {
        let estado: Estado = serde_json::from_value(serde_json::json!({
            "sigla": "SP",
            "nome": "São Paulo",
            "capital": "São Paulo",
            "cidades": ["Campinas", "Santos"]
        }))
        .unwrap();

        assert_eq!(estado.sigla.as_deref(), Some("SP"));
        assert_eq!(
            estado.cidades,
            Some(vec!["Campinas".to_string(), "Santos".to_string()])
        );
    }

    #[test]
    fn test_decode_partial_record_ignores_unknown_fields() {
        let estado: Estado = serde_json::from_value(serde_json::json!({
            "sigla": "AC",
            "id": 12
        }))
        .unwrap();

        assert_eq!(estado.sigla.as_deref(), Some("AC"));
        assert_eq!(estado.nome, None);
        assert_eq!(estado.cidades, None);
    }
}
