//! SQLite schema initialization for graphnav.
//!
//! Two tables: `nodes` and `edges`, with cascade-delete foreign keys from
//! edge endpoints to nodes and the indexes the traversal layer depends on.

use rusqlite::Connection;

// ---------------------------------------------------------------------------
// DDL constants — kept as separate strings so each statement can be executed
// individually, which makes error reporting clearer than one big batch.
// ---------------------------------------------------------------------------

// AUTOINCREMENT keeps node ids monotonic: a deleted node's id is never
// handed out again within the same database.
const CREATE_NODES: &str = "\
CREATE TABLE IF NOT EXISTS nodes (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL,
  description TEXT,
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
)";

const CREATE_EDGES: &str = "\
CREATE TABLE IF NOT EXISTS edges (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  source_node_id INTEGER NOT NULL,
  target_node_id INTEGER NOT NULL,
  label TEXT,
  created_at TEXT NOT NULL,
  FOREIGN KEY (source_node_id) REFERENCES nodes(id) ON DELETE CASCADE,
  FOREIGN KEY (target_node_id) REFERENCES nodes(id) ON DELETE CASCADE
)";

// Indexes ----------------------------------------------------------------

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_nodes_name ON nodes(name)",
    "CREATE INDEX IF NOT EXISTS idx_edges_source ON edges(source_node_id)",
    "CREATE INDEX IF NOT EXISTS idx_edges_target ON edges(target_node_id)",
    "CREATE INDEX IF NOT EXISTS idx_edges_source_target ON edges(source_node_id, target_node_id)",
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Open (or create) the SQLite database at `db_path` and apply the full
/// graphnav schema.
///
/// The returned connection has WAL mode, foreign-key enforcement, and
/// synchronous NORMAL already configured.
///
/// # Errors
///
/// Returns a `rusqlite::Error` if the database cannot be opened or any DDL
/// statement fails.
pub fn initialize_database(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;

    // -- Pragmas ----------------------------------------------------------
    conn.pragma_update(None, "journal_mode", "WAL")?;
    // Every edge endpoint is a real node row, so FK enforcement is ON:
    // the cascade FKs are the storage-level backstop behind the store's
    // explicit endpoint checks.
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    // -- Tables -----------------------------------------------------------
    conn.execute_batch(CREATE_NODES)?;
    conn.execute_batch(CREATE_EDGES)?;

    // -- Indexes ----------------------------------------------------------
    for ddl in CREATE_INDEXES {
        conn.execute_batch(ddl)?;
    }

    Ok(conn)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: initialize an in-memory database and return the connection.
    fn setup() -> Connection {
        initialize_database(":memory:").expect("schema creation should succeed on :memory:")
    }

    /// Helper: query sqlite_master for a given type and name.
    fn object_exists(conn: &Connection, obj_type: &str, obj_name: &str) -> bool {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
                rusqlite::params![obj_type, obj_name],
                |row| row.get(0),
            )
            .unwrap();
        count > 0
    }

    fn insert_node(conn: &Connection, name: &str) -> i64 {
        conn.execute(
            "INSERT INTO nodes (name, created_at, updated_at)
             VALUES (?1, '2026-01-01T00:00:00+00:00', '2026-01-01T00:00:00+00:00')",
            rusqlite::params![name],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    #[test]
    fn schema_creation_succeeds() {
        let _conn = setup();
    }

    #[test]
    fn core_tables_exist() {
        let conn = setup();
        for table in &["nodes", "edges"] {
            assert!(
                object_exists(&conn, "table", table),
                "table '{table}' should exist"
            );
        }
    }

    #[test]
    fn indexes_exist() {
        let conn = setup();
        let expected = [
            "idx_nodes_name",
            "idx_edges_source",
            "idx_edges_target",
            "idx_edges_source_target",
        ];
        for idx in &expected {
            assert!(
                object_exists(&conn, "index", idx),
                "index '{idx}' should exist"
            );
        }
    }

    #[test]
    fn pragmas_are_set() {
        let conn = setup();

        let journal_mode: String = conn
            .pragma_query_value(None, "journal_mode", |row| row.get(0))
            .unwrap();
        // In-memory databases report "memory" instead of "wal".
        assert!(
            journal_mode == "wal" || journal_mode == "memory",
            "journal_mode should be 'wal' or 'memory', got '{journal_mode}'"
        );

        let fk: i64 = conn
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1, "foreign_keys should be ON");

        let sync: i64 = conn
            .pragma_query_value(None, "synchronous", |row| row.get(0))
            .unwrap();
        // NORMAL = 1
        assert_eq!(sync, 1, "synchronous should be NORMAL (1)");
    }

    #[test]
    fn nodes_table_has_expected_columns() {
        let conn = setup();
        let columns: Vec<String> = conn
            .prepare("PRAGMA table_info(nodes)")
            .unwrap()
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        for col in &["id", "name", "description", "created_at", "updated_at"] {
            assert!(
                columns.contains(&col.to_string()),
                "nodes table should have column '{col}', found: {columns:?}"
            );
        }
    }

    #[test]
    fn edges_table_has_expected_columns() {
        let conn = setup();
        let columns: Vec<String> = conn
            .prepare("PRAGMA table_info(edges)")
            .unwrap()
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        for col in &[
            "id",
            "source_node_id",
            "target_node_id",
            "label",
            "created_at",
        ] {
            assert!(
                columns.contains(&col.to_string()),
                "edges table should have column '{col}', found: {columns:?}"
            );
        }
    }

    #[test]
    fn foreign_keys_reject_dangling_edge() {
        let conn = setup();
        let result = conn.execute(
            "INSERT INTO edges (source_node_id, target_node_id, created_at)
             VALUES (100, 200, '2026-01-01T00:00:00+00:00')",
            [],
        );
        assert!(result.is_err(), "edge to nonexistent nodes should fail");
    }

    #[test]
    fn deleting_node_cascades_to_edges() {
        let conn = setup();
        let a = insert_node(&conn, "a");
        let b = insert_node(&conn, "b");
        conn.execute(
            "INSERT INTO edges (source_node_id, target_node_id, created_at)
             VALUES (?1, ?2, '2026-01-01T00:00:00+00:00')",
            rusqlite::params![a, b],
        )
        .unwrap();

        conn.execute("DELETE FROM nodes WHERE id = ?1", rusqlite::params![a])
            .unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0, "edge should be cascade-deleted with its source");
    }

    #[test]
    fn node_ids_are_not_reused_after_delete() {
        let conn = setup();
        let first = insert_node(&conn, "first");
        conn.execute("DELETE FROM nodes WHERE id = ?1", rusqlite::params![first])
            .unwrap();
        let second = insert_node(&conn, "second");
        assert!(
            second > first,
            "AUTOINCREMENT should never hand out a deleted id again"
        );
    }

    #[test]
    fn edge_ids_autoincrement() {
        let conn = setup();
        let a = insert_node(&conn, "a");
        let b = insert_node(&conn, "b");
        for _ in 0..2 {
            conn.execute(
                "INSERT INTO edges (source_node_id, target_node_id, created_at)
                 VALUES (?1, ?2, '2026-01-01T00:00:00+00:00')",
                rusqlite::params![a, b],
            )
            .unwrap();
        }
        let ids: Vec<i64> = conn
            .prepare("SELECT id FROM edges ORDER BY id")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(ids[1] > ids[0], "edge ids should auto-increment");
    }

    #[test]
    fn parallel_edges_between_same_pair_are_allowed() {
        let conn = setup();
        let a = insert_node(&conn, "a");
        let b = insert_node(&conn, "b");
        for label in &["first", "second"] {
            conn.execute(
                "INSERT INTO edges (source_node_id, target_node_id, label, created_at)
                 VALUES (?1, ?2, ?3, '2026-01-01T00:00:00+00:00')",
                rusqlite::params![a, b, label],
            )
            .unwrap();
        }
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2, "no uniqueness constraint on (source, target)");
    }

    #[test]
    fn self_loop_is_allowed() {
        let conn = setup();
        let a = insert_node(&conn, "a");
        conn.execute(
            "INSERT INTO edges (source_node_id, target_node_id, created_at)
             VALUES (?1, ?1, '2026-01-01T00:00:00+00:00')",
            rusqlite::params![a],
        )
        .unwrap();
    }
}
