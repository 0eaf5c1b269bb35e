use crate::core::EstadosView;
use std::sync::Mutex;

/// In-memory page state, printed by the terminal client.
#[derive(Debug, Default)]
pub struct BufferedView {
    options: Mutex<Vec<(String, String)>>,
    cidades: Mutex<Vec<String>>,
}

impl BufferedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> Vec<(String, String)> {
        self.options.lock().map(|o| o.clone()).unwrap_or_default()
    }

    pub fn cidades(&self) -> Vec<String> {
        self.cidades.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn render_options(&self) -> String {
        self.options()
            .iter()
            .map(|(sigla, nome)| format!("{:>4}  {}", sigla, nome))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_cidades(&self) -> String {
        self.cidades()
            .iter()
            .map(|cidade| format!("  - {}", cidade))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl EstadosView for BufferedView {
    fn append_option(&self, sigla: &str, nome: &str) {
        if let Ok(mut options) = self.options.lock() {
            options.push((sigla.to_string(), nome.to_string()));
        }
    }

    fn clear_cidades(&self) {
        if let Ok(mut cidades) = self.cidades.lock() {
            cidades.clear();
        }
    }

    fn append_cidade(&self, cidade: &str) {
        if let Ok(mut cidades) = self.cidades.lock() {
            cidades.push(cidade.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists() {
        let view = BufferedView::new();
        view.append_option("SP", "São Paulo");
        view.append_cidade("Campinas");
        view.append_cidade("Santos");

        assert_eq!(view.render_options(), "  SP  São Paulo");
        assert_eq!(view.render_cidades(), "  - Campinas\n  - Santos");

        view.clear_cidades();
        assert!(view.cidades().is_empty());
    }
}
