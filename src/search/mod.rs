//! Case-insensitive substring search over document metadata.

use crate::graph::{Graph, Node};

/// Default number of hits shown to a user.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

fn matches(node: &Node, query: &str) -> bool {
    node.id.to_string().contains(query)
        || [&node.label, &node.title, &node.signing_date, &node.citation]
            .iter()
            .any(|field| field.to_lowercase().contains(query))
}

/// Find documents whose number, label, title, signing date or citation
/// contains `query`. A blank query matches nothing. Results follow graph order.
///
/// # Example
///
/// ```
/// use eograph::graph::{Graph, Node};
/// use eograph::search::search_nodes;
///
/// let mut graph = Graph::new();
/// graph.insert_node(Node::new(13765));
/// graph.insert_node(Node::new(14036));
///
/// let hits = search_nodes(&graph, "eo 137");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, 13765);
/// ```
pub fn search_nodes<'g>(graph: &'g Graph, query: &str) -> Vec<&'g Node> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    graph.nodes().iter().filter(|n| matches(n, &query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();

        let mut a = Node::new(13765);
        a.title = "Minimizing the Economic Burden of the Patient Protection Act".to_string();
        a.signing_date = "2017-01-20".to_string();
        a.citation = "82 FR 8351".to_string();
        graph.insert_node(a);

        let mut b = Node::new(14036);
        b.title = "Promoting Competition in the American Economy".to_string();
        b.signing_date = "2021-07-09".to_string();
        b.citation = "86 FR 36987".to_string();
        graph.insert_node(b);

        graph.insert_node(Node::new(12866));
        graph
    }

    fn ids(hits: &[&Node]) -> Vec<u64> {
        hits.iter().map(|n| n.id).collect()
    }

    #[test]
    fn test_search_blank_query() {
        let graph = sample_graph();
        assert!(search_nodes(&graph, "").is_empty());
        assert!(search_nodes(&graph, "   ").is_empty());
    }

    #[test]
    fn test_search_by_number_and_label() {
        let graph = sample_graph();
        assert_eq!(ids(&search_nodes(&graph, "14036")), vec![14036]);
        assert_eq!(ids(&search_nodes(&graph, "EO 128")), vec![12866]);
    }

    #[test]
    fn test_search_by_title_case_insensitive() {
        let graph = sample_graph();
        assert_eq!(ids(&search_nodes(&graph, "ECONOMIC")), vec![13765]);
        assert_eq!(ids(&search_nodes(&graph, "econom")), vec![13765, 14036]);
    }

    #[test]
    fn test_search_by_date_and_citation() {
        let graph = sample_graph();
        assert_eq!(ids(&search_nodes(&graph, "2021-07")), vec![14036]);
        assert_eq!(ids(&search_nodes(&graph, "82 fr")), vec![13765]);
    }

    #[test]
    fn test_search_default_title_matches() {
        let graph = sample_graph();
        assert_eq!(ids(&search_nodes(&graph, "executive order")), vec![12866]);
    }

    #[test]
    fn test_search_no_match() {
        let graph = sample_graph();
        assert!(search_nodes(&graph, "tariff").is_empty());
    }
}
