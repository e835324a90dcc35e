//! SQLite CRUD layer for the graph.
//!
//! Uses `rusqlite` with `prepare_cached` so the first call compiles each
//! statement and subsequent calls reuse it from the connection's cache.
//! Multi-statement mutations run inside a single transaction.

use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::db::converters::{row_to_edge, row_to_node};
use crate::db::schema::initialize_database;
use crate::error::{GraphError, Result};
use crate::types::{Edge, Node, MAX_LABEL_LEN, MAX_NAME_LEN};

// ---------------------------------------------------------------------------
// SQL constants
// ---------------------------------------------------------------------------

const INSERT_NODE_SQL: &str = "\
INSERT INTO nodes (name, description, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4)";

const SELECT_NODE_SQL: &str = "\
SELECT id, name, description, created_at, updated_at FROM nodes WHERE id = ?1";

const LIST_NODES_SQL: &str = "\
SELECT id, name, description, created_at, updated_at FROM nodes
ORDER BY id ASC LIMIT ?1 OFFSET ?2";

const UPDATE_NODE_SQL: &str = "\
UPDATE nodes SET name = ?2, description = ?3, updated_at = ?4 WHERE id = ?1";

const INSERT_EDGE_SQL: &str = "\
INSERT INTO edges (source_node_id, target_node_id, label, created_at)
VALUES (?1, ?2, ?3, ?4)";

const SELECT_EDGE_SQL: &str = "\
SELECT id, source_node_id, target_node_id, label, created_at FROM edges WHERE id = ?1";

const DELETE_NODE_EDGES_SQL: &str = "\
DELETE FROM edges WHERE source_node_id = ?1 OR target_node_id = ?1";

const DELETE_NODE_SQL: &str = "DELETE FROM nodes WHERE id = ?1";

const OUTGOING_EDGES_SQL: &str = "\
SELECT target_node_id FROM edges WHERE source_node_id = ?1 ORDER BY target_node_id";

const NODE_EXISTS_SQL: &str = "SELECT 1 FROM nodes WHERE id = ?1";

// SQLite's host-parameter limit is comfortably above this; batching keeps
// dynamically built IN-lists well clear of it.
const IN_LIST_BATCH: usize = 512;

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(GraphError::Validation(
            "name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(GraphError::Validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_label(label: Option<&str>) -> Result<()> {
    if let Some(label) = label {
        if label.chars().count() > MAX_LABEL_LEN {
            return Err(GraphError::Validation(format!(
                "label must be at most {MAX_LABEL_LEN} characters"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GraphStore
// ---------------------------------------------------------------------------

/// Typed CRUD wrapper around the graphnav SQLite database.
pub struct GraphStore {
    conn: Connection,
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore").finish_non_exhaustive()
    }
}

impl GraphStore {
    /// Open (or create) the database at `db_path`, apply the schema, and
    /// return a ready-to-use store.
    pub fn open(db_path: &str) -> Result<Self> {
        Ok(Self {
            conn: initialize_database(db_path)?,
        })
    }

    /// In-memory store for tests and ephemeral use.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    /// Wrap an already-open connection. The caller is responsible for
    /// having applied the schema.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    // -------------------------------------------------------------------
    // Nodes
    // -------------------------------------------------------------------

    /// Insert a new node. Both timestamps are set to the same instant.
    pub fn create_node(&self, name: &str, description: Option<&str>) -> Result<Node> {
        validate_name(name)?;
        let now = Utc::now();
        let mut stmt = self.conn.prepare_cached(INSERT_NODE_SQL)?;
        stmt.execute(params![name, description, now, now])?;
        self.fetch_node(self.conn.last_insert_rowid())
    }

    /// Point lookup by id.
    pub fn get_node(&self, id: i64) -> Result<Option<Node>> {
        let mut stmt = self.conn.prepare_cached(SELECT_NODE_SQL)?;
        stmt.query_row(params![id], row_to_node)
            .optional()
            .map_err(Into::into)
    }

    /// One page of nodes ordered by id ascending, plus the total count.
    pub fn list_nodes(&self, offset: u64, limit: u32) -> Result<(Vec<Node>, u64)> {
        let total = self.count_nodes()?;
        let mut stmt = self.conn.prepare_cached(LIST_NODES_SQL)?;
        let nodes = stmt
            .query_map(params![limit, offset], row_to_node)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((nodes, total))
    }

    /// Update name and/or description; omitted fields keep their current
    /// value. Refreshes `updated_at`. Returns `None` when the node is
    /// absent.
    pub fn update_node(
        &self,
        id: i64,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Node>> {
        if let Some(name) = name {
            validate_name(name)?;
        }
        let Some(existing) = self.get_node(id)? else {
            return Ok(None);
        };
        let new_name = name.unwrap_or(&existing.name);
        let new_description = description.or(existing.description.as_deref());
        let mut stmt = self.conn.prepare_cached(UPDATE_NODE_SQL)?;
        stmt.execute(params![id, new_name, new_description, Utc::now()])?;
        Ok(Some(self.fetch_node(id)?))
    }

    /// Delete a node and, atomically, every edge referencing it as source
    /// or target. Returns false when the node is absent.
    ///
    /// The edges are deleted explicitly inside the same transaction even
    /// though the cascade FKs would also remove them, so atomicity does not
    /// depend on pragma state.
    pub fn delete_node(&self, id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(DELETE_NODE_EDGES_SQL, params![id])?;
        let deleted = tx.execute(DELETE_NODE_SQL, params![id])?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    // -------------------------------------------------------------------
    // Edges
    // -------------------------------------------------------------------

    /// Insert a directed edge after confirming both endpoints exist.
    ///
    /// The existence checks and the insert run in one transaction, so a
    /// failed check writes nothing.
    pub fn create_edge(&self, source: i64, target: i64, label: Option<&str>) -> Result<Edge> {
        validate_label(label)?;
        let tx = self.conn.unchecked_transaction()?;
        if !node_exists(&tx, source)? {
            return Err(GraphError::NotFound(format!(
                "Source node {source} not found"
            )));
        }
        if !node_exists(&tx, target)? {
            return Err(GraphError::NotFound(format!(
                "Target node {target} not found"
            )));
        }
        {
            let mut stmt = tx.prepare_cached(INSERT_EDGE_SQL)?;
            stmt.execute(params![source, target, label, Utc::now()])?;
        }
        let id = tx.last_insert_rowid();
        tx.commit()?;

        let mut stmt = self.conn.prepare_cached(SELECT_EDGE_SQL)?;
        stmt.query_row(params![id], row_to_edge).map_err(Into::into)
    }

    /// Target ids of every edge leaving `node_id`, served by the source
    /// index. Parallel edges yield repeated targets.
    pub fn get_outgoing_edges(&self, node_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare_cached(OUTGOING_EDGES_SQL)?;
        let targets = stmt
            .query_map(params![node_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(targets)
    }

    /// Distinct targets of every edge whose source is in `sources` — one
    /// batched query per chunk, never one per node.
    pub fn successors_of(&self, sources: &[i64]) -> Result<Vec<i64>> {
        let mut targets = Vec::new();
        for chunk in sources.chunks(IN_LIST_BATCH) {
            let placeholders = placeholder_list(chunk.len());
            let sql = format!(
                "SELECT DISTINCT target_node_id FROM edges WHERE source_node_id IN ({placeholders})"
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(chunk.iter()), |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<i64>>>()?;
            targets.extend(rows);
        }
        Ok(targets)
    }

    /// Resolve `(id, name)` pairs for the given node ids, batched.
    pub fn node_names(&self, ids: &[i64]) -> Result<Vec<(i64, String)>> {
        let mut names = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(IN_LIST_BATCH) {
            let placeholders = placeholder_list(chunk.len());
            let sql = format!("SELECT id, name FROM nodes WHERE id IN ({placeholders})");
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(chunk.iter()), |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })?
                .collect::<rusqlite::Result<Vec<(i64, String)>>>()?;
            names.extend(rows);
        }
        Ok(names)
    }

    // -------------------------------------------------------------------
    // Stats and health
    // -------------------------------------------------------------------

    pub fn count_nodes(&self) -> Result<u64> {
        let mut stmt = self.conn.prepare_cached("SELECT COUNT(*) FROM nodes")?;
        let count: i64 = stmt.query_row([], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn count_edges(&self) -> Result<u64> {
        let mut stmt = self.conn.prepare_cached("SELECT COUNT(*) FROM edges")?;
        let count: i64 = stmt.query_row([], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Connectivity probe for the health endpoint.
    pub fn ping(&self) -> Result<()> {
        let mut stmt = self.conn.prepare_cached("SELECT 1")?;
        let _: i64 = stmt.query_row([], |row| row.get(0))?;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    fn fetch_node(&self, id: i64) -> Result<Node> {
        self.get_node(id)?.ok_or_else(|| {
            GraphError::Unexpected(format!("node {id} missing immediately after write"))
        })
    }
}

fn node_exists(conn: &Connection, id: i64) -> Result<bool> {
    let mut stmt = conn.prepare_cached(NODE_EXISTS_SQL)?;
    Ok(stmt
        .query_row(params![id], |_| Ok(()))
        .optional()?
        .is_some())
}

fn placeholder_list(len: usize) -> String {
    let mut s = String::with_capacity(len * 2);
    for i in 0..len {
        if i > 0 {
            s.push(',');
        }
        s.push('?');
    }
    s
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
