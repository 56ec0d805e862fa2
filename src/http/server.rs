use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::analysis::{analyze, GraphMetrics};
use crate::config::Config;
use crate::error::{EographError, Result};
use crate::graph::{filter_by_relation, related_documents, DocumentId, Edge, Graph, Node, RelationType};
use crate::layout::{seed_layout, Layout, LayoutMode};
use crate::pipeline::load_graph;
use crate::search::{search_nodes, DEFAULT_SEARCH_LIMIT};

const DEFAULT_RELATED_DEPTH: usize = 2;

/// Serves the current graph to the presentation layer.
pub struct GraphServer {
    state: AppState,
    allowed_origins: Vec<String>,
}

/// Application state shared across handlers.
///
/// The graph sits behind one `Arc`; a reload swaps the whole value.
#[derive(Clone)]
struct AppState {
    graph: Arc<RwLock<Arc<Graph>>>,
    config: Arc<Config>,
}

impl AppState {
    async fn graph(&self) -> Arc<Graph> {
        Arc::clone(&*self.graph.read().await)
    }
}

impl GraphServer {
    pub fn new(graph: Graph, config: Config) -> Self {
        let allowed_origins = config.http_server.allowed_origins.clone();
        Self {
            state: AppState {
                graph: Arc::new(RwLock::new(Arc::new(graph))),
                config: Arc::new(config),
            },
            allowed_origins,
        }
    }

    /// Bind to `127.0.0.1:port` and serve until the process exits.
    pub async fn run(&self, port: u16) -> Result<()> {
        let app = self.router();
        let addr = format!("127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
            EographError::Config(format!(
                "Failed to bind to {}: {}. Set http_server.port in config.toml to use another port.",
                addr, e
            ))
        })?;

        log::info!("Serving graph API on http://{}", addr);

        axum::serve(listener, app).await?;
        Ok(())
    }

    /// Create the axum router
    pub fn router(&self) -> Router {
        let cors = if self.allowed_origins.is_empty() {
            CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
        } else {
            let origins: Vec<axum::http::HeaderValue> = self
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(handle_health))
            .route("/api/graph", get(handle_graph))
            .route("/api/relation-types", get(handle_relation_types))
            .route("/api/metrics", get(handle_metrics))
            .route("/api/search", get(handle_search))
            .route("/api/nodes/:id", get(handle_node))
            .route("/api/nodes/:id/related", get(handle_related))
            .route("/api/reload", post(handle_reload))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
            .with_state(self.state.clone())
    }
}

/// Error body returned by every handler.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<EographError> for ApiError {
    fn from(err: EographError) -> Self {
        let status = match err {
            EographError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            EographError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            EographError::Retrieval { .. } | EographError::Decode(_) | EographError::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

fn parse_types(raw: Option<&str>) -> std::result::Result<Vec<RelationType>, ApiError> {
    Ok(raw.map(RelationType::parse_list).transpose()?.unwrap_or_default())
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
struct GraphParams {
    layout: Option<String>,
    types: Option<String>,
}

async fn handle_graph(
    State(state): State<AppState>,
    Query(params): Query<GraphParams>,
) -> ApiResult<Layout> {
    let mode = match params.layout.as_deref() {
        Some(raw) => raw.parse::<LayoutMode>()?,
        None => state.config.layout.mode,
    };
    let types = parse_types(params.types.as_deref())?;

    let graph = state.graph().await;
    let view = filter_by_relation(&graph, &types);
    Ok(Json(seed_layout(&view, mode)))
}

/// Legend entry for one relationship type.
#[derive(Debug, Serialize)]
struct RelationTypeInfo {
    #[serde(rename = "type")]
    relation_type: RelationType,
    label: &'static str,
    color: &'static str,
    passive: bool,
}

async fn handle_relation_types() -> Json<Vec<RelationTypeInfo>> {
    Json(
        RelationType::ALL
            .iter()
            .map(|&relation_type| RelationTypeInfo {
                relation_type,
                label: relation_type.label(),
                color: relation_type.color(),
                passive: relation_type.is_passive(),
            })
            .collect(),
    )
}

#[derive(Debug, Deserialize)]
struct MetricsParams {
    top_k: Option<usize>,
}

async fn handle_metrics(
    State(state): State<AppState>,
    Query(params): Query<MetricsParams>,
) -> ApiResult<Option<GraphMetrics>> {
    let top_k = params.top_k.unwrap_or(state.config.analysis.top_k);
    let graph = state.graph().await;
    Ok(Json(analyze(&graph, top_k)))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    total: usize,
    results: Vec<Node>,
}

async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<SearchResponse> {
    let graph = state.graph().await;
    let hits = search_nodes(&graph, params.q.as_deref().unwrap_or_default());
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

    Ok(Json(SearchResponse {
        total: hits.len(),
        results: hits.into_iter().take(limit).cloned().collect(),
    }))
}

#[derive(Debug, Serialize)]
struct NodeResponse {
    node: Node,
    edges: Vec<Edge>,
}

async fn handle_node(
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> ApiResult<NodeResponse> {
    let graph = state.graph().await;
    let node = graph.node(id).cloned().ok_or(EographError::DocumentNotFound(id))?;
    Ok(Json(NodeResponse { node, edges: graph.incident_edges(id) }))
}

#[derive(Debug, Deserialize)]
struct RelatedParams {
    depth: Option<usize>,
    types: Option<String>,
}

#[derive(Debug, Serialize)]
struct RelatedResponse {
    edges: Vec<Edge>,
}

async fn handle_related(
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
    Query(params): Query<RelatedParams>,
) -> ApiResult<RelatedResponse> {
    let types = parse_types(params.types.as_deref())?;
    let graph = state.graph().await;
    if !graph.contains(id) {
        return Err(EographError::DocumentNotFound(id).into());
    }

    let filter = (!types.is_empty()).then_some(types.as_slice());
    let depth = params.depth.unwrap_or(DEFAULT_RELATED_DEPTH);
    Ok(Json(RelatedResponse { edges: related_documents(&graph, id, filter, depth) }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReloadResponse {
    total_documents: usize,
    total_relationships: usize,
}

async fn handle_reload(State(state): State<AppState>) -> ApiResult<ReloadResponse> {
    log::info!("Reloading source table");
    let graph = load_graph(&state.config.source).await.map_err(|e| {
        log::error!("Reload failed, keeping previous graph: {}", e);
        ApiError::from(e)
    })?;

    let response = ReloadResponse {
        total_documents: graph.node_count(),
        total_relationships: graph.edge_count(),
    };
    *state.graph.write().await = Arc::new(graph);
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        for id in [100, 200, 300] {
            graph.insert_node(Node::new(id));
        }
        graph.add_edge(Edge { source: 100, target: 200, relation_type: RelationType::Revokes });
        graph.add_edge(Edge { source: 200, target: 300, relation_type: RelationType::Amends });
        graph
    }

    async fn call(router: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn router() -> Router {
        GraphServer::new(sample_graph(), Config::default()).router()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(router(), "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_graph_default_layout() {
        let (status, body) = call(router(), "GET", "/api/graph").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "centrality");
        assert_eq!(body["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(body["nodes"][0]["id"], 200);
        assert_eq!(body["links"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_graph_filtered_by_type() {
        let (status, body) = call(router(), "GET", "/api/graph?layout=date&types=amends").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "date");
        let links = body["links"].as_array().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0]["type"], "amends");
        assert_eq!(body["nodes"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_graph_rejects_unknown_type() {
        let (status, body) = call(router(), "GET", "/api/graph?types=rescinds").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("rescinds"));
    }

    #[tokio::test]
    async fn test_relation_type_legend() {
        let (status, body) = call(router(), "GET", "/api/relation-types").await;
        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), RelationType::ALL.len());
        assert_eq!(entries[0]["type"], "revoked_by");
        assert_eq!(entries[0]["label"], "Revoked By");
        assert_eq!(entries[0]["color"], "#ff4444");
        assert_eq!(entries[0]["passive"], true);
        let see = entries.iter().find(|e| e["type"] == "see").unwrap();
        assert_eq!(see["color"], "#4488ff");
        assert_eq!(see["passive"], false);
    }

    #[tokio::test]
    async fn test_metrics() {
        let (status, body) = call(router(), "GET", "/api/metrics?top_k=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalDocuments"], 3);
        assert_eq!(body["totalRelationships"], 2);
        assert_eq!(body["mostConnected"].as_array().unwrap().len(), 1);
        assert_eq!(body["mostConnected"][0]["id"], 200);
    }

    #[tokio::test]
    async fn test_metrics_empty_graph_is_null() {
        let router = GraphServer::new(Graph::new(), Config::default()).router();
        let (status, body) = call(router, "GET", "/api/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_search_with_limit() {
        let (status, body) = call(router(), "GET", "/api/search?q=eo&limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["results"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_node_details_and_missing() {
        let (status, body) = call(router(), "GET", "/api/nodes/200").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["node"]["label"], "EO 200");
        assert_eq!(body["edges"].as_array().unwrap().len(), 2);

        let (status, _) = call(router(), "GET", "/api/nodes/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_related_documents() {
        let (status, body) = call(router(), "GET", "/api/nodes/100/related?depth=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["edges"].as_array().unwrap().len(), 2);

        let (_, body) = call(router(), "GET", "/api/nodes/100/related?types=amends").await;
        assert!(body["edges"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reload_replaces_graph() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("eo.csv");
        fs::write(&path, "executive_order_number,disposition_notes\n1,Amends: EO 2\n2,\n").unwrap();

        let mut config = Config::default();
        config.source.locations = vec![path.to_string_lossy().to_string()];
        let router = GraphServer::new(sample_graph(), config).router();

        let (status, body) = call(router.clone(), "POST", "/api/reload").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalDocuments"], 2);
        assert_eq!(body["totalRelationships"], 1);

        let (_, body) = call(router, "GET", "/api/nodes/100").await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_reload_failure_keeps_previous_graph() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.source.locations = vec![temp_dir.path().join("gone.csv").to_string_lossy().to_string()];
        let router = GraphServer::new(sample_graph(), config).router();

        let (status, body) = call(router.clone(), "POST", "/api/reload").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("gone.csv"));

        let (status, _) = call(router, "GET", "/api/nodes/100").await;
        assert_eq!(status, StatusCode::OK);
    }
}
