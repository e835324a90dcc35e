//! Demo graph seeding.
//!
//! Builds a 24-node graph, six levels deep, with cross-links between
//! branches, back-edges forming cycles, and one self-loop — enough shape to
//! exercise the reachability query from the CLI.

use crate::error::Result;
use crate::graph::store::GraphStore;

/// `(name, description)` per node; index in this array + 1 is the node's
/// position referenced by [`EDGES`].
const NODES: &[(&str, &str)] = &[
    ("Root Node", "The starting point of our graph"),
    ("Branch A", "First main branch"),
    ("Branch B", "Second main branch"),
    ("Branch C", "Third main branch"),
    ("A-1", "First child of Branch A"),
    ("A-2", "Second child of Branch A"),
    ("B-1", "First child of Branch B"),
    ("B-2", "Second child of Branch B"),
    ("C-1", "First child of Branch C"),
    ("C-2", "Second child of Branch C"),
    ("A-1-1", "Grandchild of A"),
    ("A-1-2", "Another grandchild of A"),
    ("A-2-1", "Grandchild of A-2"),
    ("B-1-1", "Grandchild of B"),
    ("B-2-1", "Grandchild of B-2"),
    ("C-1-1", "Grandchild of C"),
    ("A-1-1-1", "Great-grandchild level 4"),
    ("A-1-1-2", "Another at level 4"),
    ("B-1-1-1", "Deep node in B branch"),
    ("C-1-1-1", "Deep node in C branch"),
    ("A-1-1-1-1", "Very deep node - level 5"),
    ("A-1-1-2-1", "Another level 5 node"),
    ("B-1-1-1-1", "Level 5 in B branch"),
    ("A-1-1-1-1-1", "Level 6 - very deep!"),
];

/// `(source, target, label)` using 1-based positions into [`NODES`].
const EDGES: &[(usize, usize, &str)] = &[
    // Level 0 -> Level 1
    (1, 2, "to-A"),
    (1, 3, "to-B"),
    (1, 4, "to-C"),
    // Level 1 -> Level 2
    (2, 5, "branch"),
    (2, 6, "branch"),
    (3, 7, "branch"),
    (3, 8, "branch"),
    (4, 9, "branch"),
    (4, 10, "branch"),
    // Level 2 -> Level 3
    (5, 11, "child"),
    (5, 12, "child"),
    (6, 13, "child"),
    (7, 14, "child"),
    (8, 15, "child"),
    (9, 16, "child"),
    // Level 3 -> Level 4
    (11, 17, "deeper"),
    (11, 18, "deeper"),
    (14, 19, "deeper"),
    (16, 20, "deeper"),
    // Level 4 -> Level 5
    (17, 21, "very-deep"),
    (18, 22, "very-deep"),
    (19, 23, "very-deep"),
    // Level 5 -> Level 6
    (21, 24, "deepest"),
    // Cross-connections: skip-levels, same-level links, back-edges forming
    // cycles, and one self-loop.
    (2, 7, "cross-link"),
    (3, 9, "cross-link"),
    (5, 14, "skip-level"),
    (6, 7, "same-level"),
    (7, 2, "upper-level"),
    (2, 23, "lower-4-level"),
    (23, 22, "same-level"),
    (22, 2, "upper-level"),
    (3, 3, "same-edge"),
];

/// Seed the demo graph. A no-op when the store already contains nodes.
pub fn seed_database(store: &GraphStore) -> Result<()> {
    let existing = store.count_nodes()?;
    if existing > 0 {
        tracing::info!(existing, "database already contains nodes, skipping seed");
        return Ok(());
    }

    let mut ids = Vec::with_capacity(NODES.len());
    for &(name, description) in NODES {
        ids.push(store.create_node(name, Some(description))?.id);
    }
    for &(source, target, label) in EDGES {
        store.create_edge(ids[source - 1], ids[target - 1], Some(label))?;
    }

    tracing::info!(
        nodes = NODES.len(),
        edges = EDGES.len(),
        "seeded demo graph"
    );
    Ok(())
}
