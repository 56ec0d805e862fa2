//! HTTP API serving the graph, metrics and search to the presentation layer.

mod server;

pub use server::GraphServer;
