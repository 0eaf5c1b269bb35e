use clap::Parser;
use estados_cidades::utils::logger;
use estados_cidades::{BufferedView, GraphQlClient, PageController, SelectOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "estados-client")]
#[command(about = "Pick a state and list its cities through the GraphQL endpoint")]
struct Args {
    /// GraphQL endpoint to query
    #[arg(short, long, default_value = "http://localhost:4000/graphql")]
    endpoint: String,

    /// State code to select; reads codes from stdin when omitted
    #[arg(short, long)]
    sigla: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

async fn show_selection(controller: &PageController<GraphQlClient, BufferedView>, sigla: &str) {
    match controller.select(sigla).await {
        Ok(SelectOutcome::Rendered(count)) => {
            println!("{} ({} cidades)", sigla, count);
            println!("{}", controller.view().render_cidades());
        }
        Ok(SelectOutcome::NotFound) => println!("Nenhum estado encontrado para {}", sigla),
        Ok(SelectOutcome::Stale) => {}
        Err(e) => {
            tracing::error!("❌ Selection of {} failed: {}", sigla, e);
            eprintln!("❌ {}", e.user_friendly_message());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(logger::resolve_level(args.verbose, None));

    let controller = PageController::new(GraphQlClient::new(args.endpoint.clone()), BufferedView::new());

    if let Err(e) = controller.load().await {
        tracing::error!("❌ Could not load states from {}: {}", args.endpoint, e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(2);
    }
    println!("{}", controller.view().render_options());

    if let Some(sigla) = &args.sigla {
        show_selection(&controller, sigla).await;
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let sigla = line.trim();
        if sigla.is_empty() {
            continue;
        }
        show_selection(&controller, sigla).await;
    }

    Ok(())
}
