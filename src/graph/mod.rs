//! Document relationship graph: relation extraction, two-pass construction,
//! derived views (filtering) and traversal.
//!
//! The graph is built once per load and never mutated afterwards. Filtering,
//! metrics and layout all derive new values from it.

mod builder;
mod extraction;
mod filter;
mod traversal;

pub use builder::{build_graph, parse_identifier};
pub use extraction::{extract_relations, RelationCandidate};
pub use filter::filter_by_relation;
pub use traversal::related_documents;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::EographError;

/// Executive order number, the join key between rows, nodes and edges.
pub type DocumentId = u64;

/// The fixed relationship vocabulary recognised in disposition notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    RevokedBy,
    Revokes,
    Amends,
    See,
    Supersedes,
    ContinuedBy,
    ReinstatedBy,
}

impl RelationType {
    pub const ALL: [RelationType; 7] = [
        RelationType::RevokedBy,
        RelationType::Revokes,
        RelationType::Amends,
        RelationType::See,
        RelationType::Supersedes,
        RelationType::ContinuedBy,
        RelationType::ReinstatedBy,
    ];

    /// Wire name, e.g. `revoked_by`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::RevokedBy => "revoked_by",
            RelationType::Revokes => "revokes",
            RelationType::Amends => "amends",
            RelationType::See => "see",
            RelationType::Supersedes => "supersedes",
            RelationType::ContinuedBy => "continued_by",
            RelationType::ReinstatedBy => "reinstated_by",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            RelationType::RevokedBy => "Revoked By",
            RelationType::Revokes => "Revokes",
            RelationType::Amends => "Amends",
            RelationType::See => "See",
            RelationType::Supersedes => "Supersedes",
            RelationType::ContinuedBy => "Continued By",
            RelationType::ReinstatedBy => "Reinstated By",
        }
    }

    /// Link colour, served in the `/api/relation-types` legend.
    pub fn color(&self) -> &'static str {
        match self {
            RelationType::RevokedBy => "#ff4444",
            RelationType::Revokes => "#ff6666",
            RelationType::Amends => "#44aa44",
            RelationType::See => "#4488ff",
            RelationType::Supersedes => "#ffaa44",
            RelationType::ContinuedBy => "#aa44ff",
            RelationType::ReinstatedBy => "#44ffaa",
        }
    }

    /// True for the "acted upon by" forms. The edge still points from the
    /// annotated row to the matched document; only the name tells the
    /// consumer which way the action went.
    pub fn is_passive(&self) -> bool {
        matches!(
            self,
            RelationType::RevokedBy | RelationType::ContinuedBy | RelationType::ReinstatedBy
        )
    }

    /// Parse a comma-separated list such as `revokes,amends`. Blank input yields an empty list.
    pub fn parse_list(s: &str) -> Result<Vec<RelationType>, EographError> {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(RelationType::from_str)
            .collect()
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = EographError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EographError::InvalidInput(format!("Unknown relationship type: {}", s)))
    }
}

/// One executive order in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: DocumentId,
    pub label: String,
    pub title: String,
    pub signing_date: String,
    pub publication_date: String,
    pub citation: String,
    pub html_url: String,
    pub pdf_url: String,
}

impl Node {
    /// A node with only its identifier set and the default label and title.
    pub fn new(id: DocumentId) -> Self {
        Self {
            id,
            label: format!("EO {}", id),
            title: format!("Executive Order {}", id),
            signing_date: String::new(),
            publication_date: String::new(),
            citation: String::new(),
            html_url: String::new(),
            pdf_url: String::new(),
        }
    }
}

/// A validated directed relationship between two nodes of the same graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: DocumentId,
    pub target: DocumentId,
    #[serde(rename = "type")]
    pub relation_type: RelationType,
}

impl Edge {
    pub fn touches(&self, id: DocumentId) -> bool {
        self.source == id || self.target == id
    }
}

/// Node set plus edge list. Nodes keep first-seen order; edges keep insertion order.
///
/// Every edge is checked against the node set on insertion, so no edge can
/// reference a missing node.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    #[serde(rename = "links")]
    edges: Vec<Edge>,
    #[serde(skip)]
    index: HashMap<DocumentId, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. A node with an identifier already present replaces the
    /// earlier content but keeps the earlier position.
    pub fn insert_node(&mut self, node: Node) {
        match self.index.get(&node.id) {
            Some(&pos) => self.nodes[pos] = node,
            None => {
                self.index.insert(node.id, self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Add an edge if both endpoints exist. Returns whether it was added.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if self.contains(edge.source) && self.contains(edge.target) {
            self.edges.push(edge);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: DocumentId) -> Option<&Node> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges where `id` is the source or the target, in edge order.
    pub fn incident_edges(&self, id: DocumentId) -> Vec<Edge> {
        self.edges.iter().filter(|e| e.touches(id)).copied().collect()
    }

    /// Same nodes, a different edge list. Edges are re-validated.
    pub(crate) fn with_edges(&self, edges: impl IntoIterator<Item = Edge>) -> Graph {
        let mut graph = Graph {
            nodes: self.nodes.clone(),
            edges: Vec::new(),
            index: self.index.clone(),
        };
        for edge in edges {
            graph.add_edge(edge);
        }
        graph
    }
}
