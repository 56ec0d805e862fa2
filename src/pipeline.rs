//! Load -> build -> analyze -> seed, run once per load.

use crate::analysis::{analyze, GraphMetrics};
use crate::config::{Config, SourceConfig};
use crate::error::Result;
use crate::graph::{build_graph, Graph};
use crate::ingest::RecordLoader;
use crate::layout::{seed_layout, Layout};

/// Everything one pipeline run produces. Independent of any earlier run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub graph: Graph,
    /// `None` when the table had no valid rows.
    pub metrics: Option<GraphMetrics>,
    pub layout: Layout,
}

/// Fetch the source table and build the graph.
///
/// Retrieval and decode failures are returned as-is; no partial graph is produced.
pub async fn load_graph(source: &SourceConfig) -> Result<Graph> {
    let loader = RecordLoader::new(source)?;
    let rows = loader.load().await?;
    Ok(build_graph(&rows))
}

/// Run the full pipeline with the configured analysis and layout settings.
pub async fn run_pipeline(config: &Config) -> Result<PipelineOutput> {
    let graph = load_graph(&config.source).await?;
    let metrics = analyze(&graph, config.analysis.top_k);
    let layout = seed_layout(&graph, config.layout.mode);

    Ok(PipelineOutput { graph, metrics, layout })
}
