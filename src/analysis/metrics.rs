//! Graph metrics: degree centrality, density, relationship histogram and
//! temporal range.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::graph::{DocumentId, Graph, RelationType};

/// Number of edges of one relationship type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationCount {
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub label: &'static str,
    pub count: usize,
    /// Percentage of all relationships.
    pub share: f64,
}

/// A document together with its degree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCentrality {
    pub id: DocumentId,
    pub label: String,
    pub title: String,
    pub signing_date: String,
    pub connections: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
    /// Whole years, rounded up.
    pub span_years: i64,
}

/// Summary statistics over one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetrics {
    pub total_documents: usize,
    pub total_relationships: usize,
    pub isolated_nodes: usize,
    pub connected_nodes: usize,
    /// In order of first occurrence in the edge list.
    pub relationship_counts: Vec<RelationCount>,
    pub most_connected: Vec<NodeCentrality>,
    pub date_range: Option<DateRange>,
    pub average_year: Option<i32>,
    pub network_density: f64,
    pub average_degree: f64,
}

/// Degree of every node, aligned with `graph.nodes()`.
/// An edge counts once for its source and once for its target, so a self-loop counts twice.
pub fn degrees(graph: &Graph) -> Vec<usize> {
    let mut counts: HashMap<DocumentId, usize> = HashMap::new();
    for edge in graph.edges() {
        *counts.entry(edge.source).or_default() += 1;
        *counts.entry(edge.target).or_default() += 1;
    }
    graph
        .nodes()
        .iter()
        .map(|n| counts.get(&n.id).copied().unwrap_or(0))
        .collect()
}

/// Edges / possible undirected pairs. 0.0 below two nodes.
pub fn network_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let possible = (node_count * (node_count - 1)) as f64 / 2.0;
    edge_count as f64 / possible
}

/// Counts per relationship type, in order of first occurrence.
pub fn relationship_counts(graph: &Graph) -> Vec<RelationCount> {
    let mut counts: Vec<RelationCount> = Vec::new();
    for edge in graph.edges() {
        match counts.iter_mut().find(|c| c.relation_type == edge.relation_type) {
            Some(c) => c.count += 1,
            None => counts.push(RelationCount {
                relation_type: edge.relation_type,
                label: edge.relation_type.label(),
                count: 1,
                share: 0.0,
            }),
        }
    }
    let total = graph.edge_count() as f64;
    for c in &mut counts {
        c.share = c.count as f64 / total * 100.0;
    }
    counts
}

/// The `k` highest-degree documents. Ties keep graph order.
pub fn most_connected(graph: &Graph, k: usize) -> Vec<NodeCentrality> {
    let mut ranked: Vec<NodeCentrality> = graph
        .nodes()
        .iter()
        .zip(degrees(graph))
        .map(|(node, connections)| NodeCentrality {
            id: node.id,
            label: node.label.clone(),
            title: node.title.clone(),
            signing_date: node.signing_date.clone(),
            connections,
        })
        .collect();
    ranked.sort_by(|a, b| b.connections.cmp(&a.connections));
    ranked.truncate(k);
    ranked
}

/// Parse a signing date in the formats found in federal register exports.
pub fn parse_signing_date(raw: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 6] = [
        "%Y-%m-%d",
        "%m/%d/%Y",
        "%Y/%m/%d",
        "%B %d, %Y",
        "%b %d, %Y",
        "%B %d %Y",
    ];

    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Earliest/latest signing dates and the mean signing year. Unparseable dates are left out.
pub fn temporal_range(graph: &Graph) -> Option<(DateRange, i32)> {
    let dates: Vec<NaiveDate> = graph
        .nodes()
        .iter()
        .filter_map(|n| parse_signing_date(&n.signing_date))
        .collect();

    let earliest = *dates.iter().min()?;
    let latest = *dates.iter().max()?;
    let days = latest.signed_duration_since(earliest).num_days();
    let span_years = (days as f64 / 365.25).ceil() as i64;

    let year_sum: i64 = dates.iter().map(|d| i64::from(d.year())).sum();
    let average_year = (year_sum as f64 / dates.len() as f64).round() as i32;

    Some((DateRange { earliest, latest, span_years }, average_year))
}

/// Compute all metrics. Returns `None` for a graph with no nodes.
pub fn analyze(graph: &Graph, top_k: usize) -> Option<GraphMetrics> {
    if graph.is_empty() {
        return None;
    }

    let total_documents = graph.node_count();
    let total_relationships = graph.edge_count();
    let isolated_nodes = degrees(graph).iter().filter(|&&d| d == 0).count();
    let (date_range, average_year) = match temporal_range(graph) {
        Some((range, year)) => (Some(range), Some(year)),
        None => (None, None),
    };

    Some(GraphMetrics {
        total_documents,
        total_relationships,
        isolated_nodes,
        connected_nodes: total_documents - isolated_nodes,
        relationship_counts: relationship_counts(graph),
        most_connected: most_connected(graph, top_k),
        date_range,
        average_year,
        network_density: network_density(total_documents, total_relationships),
        average_degree: 2.0 * total_relationships as f64 / total_documents as f64,
    })
}
