//! Reachability over the stored graph.
//!
//! The traversal is a level-synchronous breadth-first expansion run in
//! application code: each level issues one batched successor query against
//! the store (never one round-trip per edge or per node), a visited set
//! breaks cycles, and hard ceilings on depth and visited count bound the
//! work on adversarial graphs.

use std::collections::{HashMap, HashSet};

use crate::error::{GraphError, Result};
use crate::graph::store::GraphStore;
use crate::types::ConnectedNode;

/// Hard ceiling on BFS depth. A safety valve against pathological graphs,
/// not a feature.
pub const MAX_TRAVERSAL_DEPTH: u32 = 100;

/// Ceiling on the total number of visited nodes, checked once per level.
pub const MAX_VISITED_NODES: usize = 100_000;

/// Stateless traversal engine over a [`GraphStore`].
///
/// Holds no state of its own; every invocation is a fresh computation over
/// the store's current contents.
pub struct TraversalEngine<'a> {
    store: &'a GraphStore,
}

impl<'a> TraversalEngine<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Every node transitively reachable from `source_id` by following
    /// directed edges forward, annotated with the minimum hop count.
    ///
    /// The source itself is excluded; its direct successors have depth 1.
    /// Results are ordered by depth ascending, then id ascending within a
    /// depth, regardless of edge insertion order.
    ///
    /// # Errors
    ///
    /// [`GraphError::NotFound`] when `source_id` does not reference an
    /// existing node.
    pub fn connected_nodes(&self, source_id: i64) -> Result<Vec<ConnectedNode>> {
        if self.store.get_node(source_id)?.is_none() {
            return Err(GraphError::NotFound(format!(
                "Node with id {source_id} not found"
            )));
        }

        // Seeding visited with the source is what keeps the source out of
        // the result and what makes a self-loop contribute nothing.
        let mut visited: HashSet<i64> = HashSet::new();
        visited.insert(source_id);
        let mut frontier: Vec<i64> = vec![source_id];
        // Discovery order; a node is recorded at the first depth it is ever
        // seen and never updated afterward, which is exactly the minimum
        // over all paths under level-synchronous expansion.
        let mut discovered: Vec<(i64, u32)> = Vec::new();

        let mut depth: u32 = 0;
        while !frontier.is_empty()
            && depth < MAX_TRAVERSAL_DEPTH
            && visited.len() < MAX_VISITED_NODES
        {
            depth += 1;
            let successors = self.store.successors_of(&frontier)?;
            let mut next = Vec::with_capacity(successors.len());
            for target in successors {
                if visited.insert(target) {
                    discovered.push((target, depth));
                    next.push(target);
                }
            }
            frontier = next;
        }

        if discovered.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = discovered.iter().map(|&(id, _)| id).collect();
        let name_by_id: HashMap<i64, String> =
            self.store.node_names(&ids)?.into_iter().collect();

        let mut result: Vec<ConnectedNode> = discovered
            .into_iter()
            .filter_map(|(id, depth)| {
                name_by_id.get(&id).map(|name| ConnectedNode {
                    id,
                    name: name.clone(),
                    depth,
                })
            })
            .collect();
        result.sort_unstable_by_key(|n| (n.depth, n.id));

        tracing::debug!(
            source_id,
            reachable = result.len(),
            "reachability query complete"
        );
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
