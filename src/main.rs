use clap::Parser;
use estados_cidades::core::ConfigProvider;
use estados_cidades::utils::error::{ErrorSeverity, EstadosError};
use estados_cidades::utils::{logger, validation::Validate};
use estados_cidades::{build_schema, serve, RestEstadosSource, ServerConfig, TomlConfig};
use std::sync::Arc;

fn exit_code(e: &EstadosError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: EstadosError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(exit_code(&e).max(1));
}

async fn run<C: ConfigProvider + Validate>(config: C) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        fail(e);
    }
    tracing::info!("✅ Configuration validated");

    if let Err(e) = serve(&config).await {
        fail(e);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerConfig::parse();

    if args.print_schema {
        let schema = build_schema(Arc::new(RestEstadosSource::new(args.upstream_endpoint.clone())));
        println!("{}", schema.sdl());
        return Ok(());
    }

    match args.config.clone() {
        Some(path) => {
            let config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            logger::init_logger(
                logger::resolve_level(args.verbose, config.log_level()),
                args.json_logs || config.json_logs(),
            );
            tracing::info!("📁 Loaded configuration from: {}", path);
            run(config).await
        }
        None => {
            logger::init_logger(logger::resolve_level(args.verbose, None), args.json_logs);
            if args.verbose {
                tracing::debug!("CLI config: {:?}", args);
            }
            run(args).await
        }
    }
}
