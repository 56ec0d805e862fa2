use eograph::analysis::analyze;
use eograph::{load_graph, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load()?;
    let graph = load_graph(&config.source).await?;

    println!("\n=== Executive Order Relationship Statistics ===\n");

    let Some(metrics) = analyze(&graph, config.analysis.top_k) else {
        println!("No executive orders found in the source table.");
        return Ok(());
    };

    println!("Overview:");
    println!("{:-<50}", "");
    println!("{:<30} {:>15}", "Total executive orders", metrics.total_documents);
    println!("{:<30} {:>15}", "Total relationships", metrics.total_relationships);
    println!("{:<30} {:>15}", "Connected documents", metrics.connected_nodes);
    println!("{:<30} {:>15}", "Isolated documents", metrics.isolated_nodes);
    println!("{:-<50}", "");

    println!("\nNetwork:");
    println!("{:-<50}", "");
    println!("{:<30} {:>15.4}", "Network density", metrics.network_density);
    println!("{:<30} {:>15.2}", "Avg connections per document", metrics.average_degree);
    println!("{:-<50}", "");

    if !metrics.relationship_counts.is_empty() {
        let mut counts = metrics.relationship_counts.clone();
        counts.sort_by(|a, b| b.count.cmp(&a.count));

        println!("\nRelationship Types:\n");
        println!("{:-<50}", "");
        println!("{:<20} {:>10} {:>15}", "Type", "Count", "Share (%)");
        println!("{:-<50}", "");
        for c in &counts {
            println!("{:<20} {:>10} {:>15.1}", c.label, c.count, c.share);
        }
        println!("{:-<50}", "");
    }

    println!("\nMost Connected Documents:\n");
    println!("{:-<80}", "");
    println!("{:<5} {:<10} {:>12}  {}", "Rank", "Order", "Connections", "Title");
    println!("{:-<80}", "");
    for (rank, item) in metrics.most_connected.iter().enumerate() {
        println!(
            "{:<5} {:<10} {:>12}  {}",
            format!("#{}", rank + 1),
            item.label,
            item.connections,
            item.title
        );
    }
    println!("{:-<80}", "");

    if let (Some(range), Some(year)) = (&metrics.date_range, metrics.average_year) {
        println!("\nTemporal Analysis:");
        println!("  Earliest document: {}", range.earliest);
        println!("  Latest document: {}", range.latest);
        println!("  Time span (years): {}", range.span_years);
        println!("  Average year: {}", year);
    }

    println!();

    Ok(())
}
