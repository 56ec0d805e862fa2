//! Derived statistics over a built graph. Pure functions; the graph is never modified.

pub mod metrics;

pub use metrics::{
    analyze, degrees, most_connected, network_density, parse_signing_date, relationship_counts,
    temporal_range, DateRange, GraphMetrics, NodeCentrality, RelationCount,
};
