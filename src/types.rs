//! Core domain and wire types for graphnav.
//!
//! All types derive serde so the same structs serve as both the domain
//! representation and the JSON payloads on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum accepted length (in characters) for a node name.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum accepted length (in characters) for an edge label.
pub const MAX_LABEL_LEN: usize = 255;

/// Upper bound on `page_size` for node listing.
pub const MAX_PAGE_SIZE: u32 = 100;

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// A graph vertex with identity, name, and optional description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A directed, optionally labeled connection between two nodes.
///
/// Edges are never updated after creation; they are only created or
/// cascade-deleted with their endpoint nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: i64,
    pub source_node_id: i64,
    pub target_node_id: i64,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A reachable node annotated with its minimum hop distance from the
/// query's source node. Derived at query time, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedNode {
    pub id: i64,
    pub name: String,
    pub depth: u32,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial node update; omitted fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeCreate {
    pub source_node_id: i64,
    pub target_node_id: i64,
    #[serde(default)]
    pub label: Option<String>,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// One page of nodes plus pagination metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct NodePage {
    pub items: Vec<Node>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

/// Result of the reachability query.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectedNodesResponse {
    pub source_node_id: i64,
    pub connected_nodes: Vec<ConnectedNode>,
    pub total_connected: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: DateTime<Utc>,
}
