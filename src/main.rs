use anyhow::Result;
use clap::Parser;
use eograph::http::GraphServer;
use eograph::{load_graph, Config};

#[derive(Parser, Debug)]
#[command(name = "eograph")]
#[command(about = "Serve the executive order relationship graph over HTTP")]
struct Args {
    /// Port to listen on (overrides http_server.port)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    let args = Args::parse();

    log::info!("Starting eograph v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    log::info!("Configuration loaded successfully");
    log::info!("Source locations: {}", config.source.locations.join(", "));

    let graph = load_graph(&config.source).await?;
    log::info!(
        "Graph ready: {} documents, {} relationships",
        graph.node_count(),
        graph.edge_count()
    );

    let port = args.port.unwrap_or(config.http_server.port);
    let server = GraphServer::new(graph, config);
    server.run(port).await?;

    Ok(())
}
