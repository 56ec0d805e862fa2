pub mod analysis;
pub mod config;
pub mod error;
pub mod graph;
pub mod http;
pub mod ingest;
pub mod layout;
pub mod pipeline;
pub mod search;

pub use config::Config;
pub use error::{EographError, Result};
pub use graph::{build_graph, extract_relations, Edge, Graph, Node, RelationType};
pub use pipeline::{load_graph, run_pipeline, PipelineOutput};
