use serde::Serialize;
use std::f64::consts::PI;

use super::style::{node_color, node_size, DEFAULT_NODE_COLOR};
use super::LayoutMode;
use crate::analysis::degrees;
use crate::graph::{Edge, Graph, Node};

const INNER_RADIUS: f64 = 100.0;
const RADIUS_SPREAD: f64 = 300.0;
const HEIGHT_SPREAD: f64 = 200.0;

/// Seeded coordinates for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A node plus the fields derived for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeededNode {
    #[serde(flatten)]
    pub node: Node,
    pub centrality: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    pub size: f64,
    pub color: String,
}

impl SeededNode {
    pub fn position(&self) -> Option<Position> {
        match (self.x, self.y, self.z) {
            (Some(x), Some(y), Some(z)) => Some(Position { x, y, z }),
            _ => None,
        }
    }

    /// Distance from the origin in the x/y plane.
    pub fn radius(&self) -> Option<f64> {
        self.position().map(|p| p.x.hypot(p.y))
    }
}

/// What the renderer receives: enriched nodes and the untouched edge list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub mode: LayoutMode,
    pub nodes: Vec<SeededNode>,
    pub links: Vec<Edge>,
}

/// Assign initial positions.
///
/// In [`LayoutMode::Centrality`] nodes are ranked by degree (descending, ties
/// in graph order) and node `i` of `n` is placed at angle `i·2π/n` with radius
/// `100 + (1 - degree/maxDegree)·300`, so hubs sit near the centre. `z` ramps
/// linearly with rank from -100. In [`LayoutMode::Date`] nodes keep graph order
/// and get no coordinates.
pub fn seed_layout(graph: &Graph, mode: LayoutMode) -> Layout {
    let degrees = degrees(graph);
    let max_degree = degrees.iter().copied().max().unwrap_or(0);
    let n = graph.node_count();

    let mut order: Vec<usize> = (0..n).collect();
    if mode == LayoutMode::Centrality {
        order.sort_by(|&a, &b| degrees[b].cmp(&degrees[a]));
    }

    let nodes = order
        .into_iter()
        .enumerate()
        .map(|(rank, idx)| {
            let degree = degrees[idx];
            let mut seeded = SeededNode {
                node: graph.nodes()[idx].clone(),
                centrality: degree,
                x: None,
                y: None,
                z: None,
                size: node_size(degree),
                color: DEFAULT_NODE_COLOR.to_string(),
            };

            if mode == LayoutMode::Centrality {
                let normalized = degree as f64 / max_degree.max(1) as f64;
                let radius = INNER_RADIUS + (1.0 - normalized) * RADIUS_SPREAD;
                let angle = rank as f64 * 2.0 * PI / n as f64;
                let height = rank as f64 / n as f64 * HEIGHT_SPREAD - HEIGHT_SPREAD / 2.0;
                seeded.x = Some(angle.cos() * radius);
                seeded.y = Some(angle.sin() * radius);
                seeded.z = Some(height);
                seeded.color = node_color(degree, max_degree);
            }

            seeded
        })
        .collect();

    log::debug!("Seeded {} nodes in {} mode", n, mode);

    Layout {
        mode,
        nodes,
        links: graph.edges().to_vec(),
    }
}
