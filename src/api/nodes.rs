//! Node handlers, including the reachability query.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::{run_blocking, AppState};
use crate::error::Result;
use crate::types::{
    ConnectedNodesResponse, Node, NodeCreate, NodePage, NodeUpdate,
};

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// `POST /nodes` — create a node. 201 on success, 422 on validation.
pub async fn create_node(
    State(state): State<AppState>,
    Json(req): Json<NodeCreate>,
) -> Result<(StatusCode, Json<Node>)> {
    let service = state.service.clone();
    let node = run_blocking(move || service.create_node(&req)).await?;
    Ok((StatusCode::CREATED, Json(node)))
}

/// `GET /nodes/{id}` — 200 with the node, 404 when absent.
pub async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Node>> {
    let service = state.service.clone();
    let node = run_blocking(move || service.get_node(id)).await?;
    Ok(Json(node))
}

/// `GET /nodes?page=&page_size=` — paginated listing ordered by id.
pub async fn list_nodes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<NodePage>> {
    let service = state.service.clone();
    let page = run_blocking(move || service.list_nodes(params.page, params.page_size)).await?;
    Ok(Json(page))
}

/// `PUT /nodes/{id}` — update name and/or description.
pub async fn update_node(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<NodeUpdate>,
) -> Result<Json<Node>> {
    let service = state.service.clone();
    let node = run_blocking(move || service.update_node(id, &req)).await?;
    Ok(Json(node))
}

/// `DELETE /nodes/{id}` — 204 on success, 404 when absent. Cascades to
/// every edge referencing the node.
pub async fn delete_node(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = state.service.clone();
    run_blocking(move || service.delete_node(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /nodes/{id}/connected` — every node reachable from `id` with its
/// minimum hop distance. 404 when the source is absent.
pub async fn connected_nodes(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ConnectedNodesResponse>> {
    let service = state.service.clone();
    let resp = run_blocking(move || service.connected_nodes(id)).await?;
    Ok(Json(resp))
}
