//! BFS graph traversal over document relations.

use std::collections::{HashSet, VecDeque};

use super::{DocumentId, Edge, Graph, RelationType};

/// Walk outgoing edges breadth-first from `start`.
/// Returns each edge that first reaches an unvisited document within `max_depth` hops.
pub fn related_documents(
    graph: &Graph,
    start: DocumentId,
    relation_types: Option<&[RelationType]>,
    max_depth: usize,
) -> Vec<Edge> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut result = Vec::new();

    if !graph.contains(start) {
        return result;
    }

    queue.push_back((start, 0));
    visited.insert(start);

    while let Some((id, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        let outgoing = graph.edges().iter().filter(|e| {
            e.source == id && relation_types.map_or(true, |types| types.contains(&e.relation_type))
        });

        for edge in outgoing {
            if visited.insert(edge.target) {
                queue.push_back((edge.target, depth + 1));
                result.push(*edge);
            }
        }
    }

    result
}
