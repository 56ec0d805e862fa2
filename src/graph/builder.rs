//! Two-pass graph construction from decoded rows.

use super::{extract_relations, DocumentId, Edge, Graph, Node};
use crate::ingest::RowRecord;

/// Parse an executive order number the lenient way real exports need:
/// surrounding whitespace is ignored and the leading run of digits is the
/// identifier, optionally preceded by `+`. Returns `None` when there is no
/// leading digit.
pub fn parse_identifier(raw: &str) -> Option<DocumentId> {
    let trimmed = raw.trim();
    // Negative numbers are not order numbers and do not fit DocumentId; skip them.
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if digits_end == 0 {
        return None;
    }
    trimmed[..digits_end].parse().ok()
}

fn node_from_row(id: DocumentId, row: &RowRecord) -> Node {
    let mut node = Node::new(id);
    if !row.title.trim().is_empty() {
        node.title = row.title.clone();
    }
    node.signing_date = row.signing_date.clone();
    node.publication_date = row.publication_date.clone();
    node.citation = row.citation.clone();
    node.html_url = row.html_url.clone();
    node.pdf_url = row.pdf_url.clone();
    node
}

/// Build the document graph.
///
/// Pass 1 creates one node per row with a valid identifier (later rows with the
/// same identifier replace the earlier content). Pass 2 extracts relations from
/// every valid row and keeps only those whose endpoints both exist, so notes
/// may refer forward to rows not yet seen.
pub fn build_graph(rows: &[RowRecord]) -> Graph {
    let valid: Vec<(DocumentId, &RowRecord)> = rows
        .iter()
        .filter_map(|row| parse_identifier(&row.executive_order_number).map(|id| (id, row)))
        .collect();

    let skipped = rows.len() - valid.len();
    if skipped > 0 {
        log::debug!("Skipped {} rows without a valid executive order number", skipped);
    }

    let mut graph = Graph::new();
    for &(id, row) in &valid {
        graph.insert_node(node_from_row(id, row));
    }

    let mut candidates = 0usize;
    let mut dropped = 0usize;
    for &(id, row) in &valid {
        for rel in extract_relations(Some(&row.disposition_notes), id) {
            candidates += 1;
            let edge = Edge {
                source: rel.source,
                target: rel.target,
                relation_type: rel.relation_type,
            };
            if !graph.add_edge(edge) {
                dropped += 1;
            }
        }
    }

    log::debug!(
        "Extracted {} relation candidates, dropped {} with unknown endpoints",
        candidates,
        dropped
    );
    log::info!(
        "Built graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RelationType;

    fn row(id: &str, title: &str, notes: &str) -> RowRecord {
        RowRecord {
            executive_order_number: id.to_string(),
            title: title.to_string(),
            disposition_notes: notes.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_identifier() {
        assert_eq!(parse_identifier("13765"), Some(13765));
        assert_eq!(parse_identifier("  13765 "), Some(13765));
        assert_eq!(parse_identifier("13765a"), Some(13765));
        assert_eq!(parse_identifier(""), None);
        assert_eq!(parse_identifier("   "), None);
        assert_eq!(parse_identifier("EO 13765"), None);
        assert_eq!(parse_identifier("n/a"), None);
        assert_eq!(parse_identifier("+13765"), Some(13765));
        assert_eq!(parse_identifier(" +5 "), Some(5));
        assert_eq!(parse_identifier("-5"), None);
        assert_eq!(parse_identifier("+"), None);
        assert_eq!(parse_identifier("++5"), None);
    }

    #[test]
    fn test_build_skips_invalid_rows() {
        let rows = vec![row("1", "One", ""), row("", "Blank", ""), row("abc", "Bad", ""), row("2", "Two", "")];
        let graph = build_graph(&rows);
        let ids: Vec<_> = graph.nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_build_node_defaults() {
        let mut r = row("42", "", "");
        r.signing_date = "2020-01-01".to_string();
        r.citation = "85 FR 1".to_string();
        let graph = build_graph(&[r]);
        let node = graph.node(42).unwrap();
        assert_eq!(node.label, "EO 42");
        assert_eq!(node.title, "Executive Order 42");
        assert_eq!(node.signing_date, "2020-01-01");
        assert_eq!(node.citation, "85 FR 1");
        assert_eq!(node.pdf_url, "");
    }

    #[test]
    fn test_build_duplicate_ids_last_write_wins() {
        let rows = vec![row("1", "First", ""), row("2", "Two", ""), row("1", "Second", "")];
        let graph = build_graph(&rows);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.nodes()[0].id, 1);
        assert_eq!(graph.nodes()[0].title, "Second");
    }

    #[test]
    fn test_build_forward_reference_resolves() {
        let rows = vec![row("1", "A", "Revoked by: EO 2"), row("2", "B", "")];
        let graph = build_graph(&rows);
        assert_eq!(
            graph.edges(),
            &[Edge { source: 1, target: 2, relation_type: RelationType::RevokedBy }]
        );
    }

    #[test]
    fn test_build_end_to_end_three_rows() {
        let rows = vec![
            row("100", "A", "Revokes: EO 200"),
            row("200", "B", ""),
            row("300", "C", "See: EO 999"),
        ];
        let graph = build_graph(&rows);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(
            graph.edges(),
            &[Edge { source: 100, target: 200, relation_type: RelationType::Revokes }]
        );
    }

    #[test]
    fn test_build_edge_order_follows_rows_then_rules() {
        let rows = vec![
            row("1", "A", "See: EO 2; EO 3\nAmends: EO 3"),
            row("2", "B", "Revokes: EO 1"),
            row("3", "C", ""),
        ];
        let graph = build_graph(&rows);
        let edges: Vec<_> = graph
            .edges()
            .iter()
            .map(|e| (e.source, e.target, e.relation_type))
            .collect();
        assert_eq!(
            edges,
            vec![
                (1, 2, RelationType::See),
                (1, 3, RelationType::See),
                (1, 3, RelationType::Amends),
                (2, 1, RelationType::Revokes),
            ]
        );
    }

    #[test]
    fn test_build_never_produces_dangling_edges() {
        let rows = vec![
            row("1", "A", "Revokes: EO 2\nSee: EO 3; EO 4; EO 5"),
            row("3", "C", "Supersedes: EO 1\nContinued by: EO 77"),
            row("x", "Bad", "Revokes: EO 1"),
        ];
        let graph = build_graph(&rows);
        for edge in graph.edges() {
            assert!(graph.contains(edge.source));
            assert!(graph.contains(edge.target));
        }
        assert_eq!(graph.edge_count(), 2);
    }
}
