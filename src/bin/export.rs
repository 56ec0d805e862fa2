use anyhow::{Context, Result};
use clap::Parser;
use eograph::graph::filter_by_relation;
use eograph::layout::{seed_layout, LayoutMode};
use eograph::{load_graph, Config, RelationType};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "export")]
#[command(about = "Write the seeded graph layout as JSON for a renderer")]
struct Args {
    /// Layout mode: centrality or date (defaults to layout.mode)
    #[arg(short, long)]
    layout: Option<LayoutMode>,

    /// Comma-separated relationship types to keep, e.g. revokes,amends
    #[arg(short, long)]
    types: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "warn")
    ).init();

    let args = Args::parse();
    let config = Config::load()?;

    let types = match args.types.as_deref() {
        Some(raw) => RelationType::parse_list(raw)?,
        None => Vec::new(),
    };
    let mode = args.layout.unwrap_or(config.layout.mode);

    let graph = load_graph(&config.source).await?;
    let view = filter_by_relation(&graph, &types);
    let layout = seed_layout(&view, mode);
    let json = serde_json::to_string_pretty(&layout)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!(
                "Wrote {} nodes and {} links to {}",
                layout.nodes.len(),
                layout.links.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
