use anyhow::Result;
use clap::Parser;
use eograph::search::{search_nodes, DEFAULT_SEARCH_LIMIT};
use eograph::{load_graph, Config};

#[derive(Parser, Debug)]
#[command(name = "search")]
#[command(about = "Search executive orders by number, title, date or citation")]
struct Args {
    /// Search text, e.g. "EO 13765" or "economic"
    query: String,

    /// Maximum number of results to show
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
    limit: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "warn")
    ).init();

    let args = Args::parse();
    let config = Config::load()?;
    let graph = load_graph(&config.source).await?;

    let hits = search_nodes(&graph, &args.query);
    if hits.is_empty() {
        println!("No documents match \"{}\".", args.query);
        return Ok(());
    }

    println!(
        "{} result{} found\n",
        hits.len(),
        if hits.len() == 1 { "" } else { "s" }
    );

    for node in hits.iter().take(args.limit) {
        println!("{}: {}", node.label, node.title);
        if !node.signing_date.is_empty() {
            println!("    Signed: {}", node.signing_date);
        }
        if !node.html_url.is_empty() {
            println!("    {}", node.html_url);
        }
        let edges = graph.incident_edges(node.id);
        for edge in &edges {
            let other = if edge.source == node.id { edge.target } else { edge.source };
            println!("    {} EO {}", edge.relation_type.label(), other);
        }
    }

    if hits.len() > args.limit {
        println!("\nShowing first {} of {} results", args.limit, hits.len());
    }

    Ok(())
}
