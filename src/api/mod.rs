//! HTTP surface for graphnav.
//!
//! Thin glue: handlers extract and validate the request, hand the work to
//! [`GraphService`] on the blocking pool, and serialize the result. All
//! error-to-status mapping lives on [`GraphError`](crate::error::GraphError).

pub mod edges;
pub mod health;
pub mod nodes;

use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{GraphError, Result};
use crate::graph::service::GraphService;

#[derive(Clone)]
pub struct AppState {
    pub service: GraphService,
}

/// Build the application router with all routes and middleware.
pub fn router(service: GraphService) -> Router {
    let state = AppState { service };
    Router::new()
        .route("/", get(root))
        .route("/health", get(health::health_check))
        .route("/nodes", get(nodes::list_nodes).post(nodes::create_node))
        .route(
            "/nodes/{id}",
            get(nodes::get_node)
                .put(nodes::update_node)
                .delete(nodes::delete_node),
        )
        .route("/nodes/{id}/connected", get(nodes::connected_nodes))
        .route("/edges", post(edges::create_edge))
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run store work on the blocking pool; the service's internal lock is
/// acquired inside the task and released when it completes.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| GraphError::Unexpected(format!("blocking task failed: {e}")))?
}

/// Build CORS layer from environment configuration.
fn build_cors_layer() -> CorsLayer {
    match std::env::var("GRAPHNAV_CORS_ORIGIN") {
        Ok(origins) => {
            use tower_http::cors::AllowOrigin;
            let origin_list: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!("CORS: restricted to {} origin(s)", origin_list.len());
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origin_list))
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any)
        }
        Err(_) => {
            tracing::warn!(
                "CORS: permissive (dev mode). Set GRAPHNAV_CORS_ORIGIN to restrict origins."
            );
            CorsLayer::permissive()
        }
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "graphnav API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
