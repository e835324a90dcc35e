//! Row-to-domain conversions shared by the store and traversal layers.

use rusqlite::Row;

use crate::types::{Edge, Node};

/// Map a `SELECT id, name, description, created_at, updated_at` row.
pub fn row_to_node(row: &Row<'_>) -> rusqlite::Result<Node> {
    Ok(Node {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Map a `SELECT id, source_node_id, target_node_id, label, created_at` row.
pub fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<Edge> {
    Ok(Edge {
        id: row.get("id")?,
        source_node_id: row.get("source_node_id")?,
        target_node_id: row.get("target_node_id")?,
        label: row.get("label")?,
        created_at: row.get("created_at")?,
    })
}
