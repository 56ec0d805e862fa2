use super::{Graph, RelationType};

/// Derive a graph with the same nodes and only the edges of the given types.
/// An empty `types` slice keeps every edge. The input is not modified.
pub fn filter_by_relation(graph: &Graph, types: &[RelationType]) -> Graph {
    if types.is_empty() {
        return graph.clone();
    }
    graph.with_edges(
        graph
            .edges()
            .iter()
            .filter(|e| types.contains(&e.relation_type))
            .copied(),
    )
}
