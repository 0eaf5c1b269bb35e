use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_LEVEL: &str = "info";

/// `--verbose` wins over a configured level; otherwise falls back to `info`.
pub fn resolve_level(verbose: bool, configured: Option<&str>) -> &str {
    if verbose {
        "debug"
    } else {
        configured.unwrap_or(DEFAULT_LEVEL)
    }
}

/// Directives used when `RUST_LOG` is unset: the library and the client binary at `level`.
fn default_directives(level: &str) -> String {
    format!("estados_cidades={level},estados_client={level}")
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

pub fn init_cli_logger(level: &str) {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(level: &str) {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // one object per line for log shippers
        )
        .init();
}

/// Picks the initializer from the `--json-logs` flag or the `logging.format` setting.
pub fn init_logger(level: &str, json: bool) {
    if json {
        init_json_logger(level);
    } else {
        init_cli_logger(level);
    }
}
