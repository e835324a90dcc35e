//! Orchestration layer between the HTTP surface and the store.
//!
//! [`GraphService`] is a clonable handle over the shared store. Every
//! method checks the store out for the duration of one call — the guard is
//! scoped, so release is guaranteed on success and failure alike — and
//! translates domain conditions (missing node, missing endpoint) into the
//! not-found taxonomy.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{GraphError, Result};
use crate::graph::store::GraphStore;
use crate::graph::traversal::TraversalEngine;
use crate::types::{
    ConnectedNodesResponse, Edge, EdgeCreate, Node, NodeCreate, NodePage, NodeUpdate,
    MAX_PAGE_SIZE,
};

#[derive(Clone)]
pub struct GraphService {
    store: Arc<Mutex<GraphStore>>,
}

impl GraphService {
    pub fn new(store: GraphStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, GraphStore>> {
        self.store
            .lock()
            .map_err(|_| GraphError::Unexpected("store lock poisoned".to_string()))
    }

    // -------------------------------------------------------------------
    // Nodes
    // -------------------------------------------------------------------

    pub fn create_node(&self, req: &NodeCreate) -> Result<Node> {
        self.store()?
            .create_node(&req.name, req.description.as_deref())
    }

    pub fn get_node(&self, id: i64) -> Result<Node> {
        self.store()?
            .get_node(id)?
            .ok_or_else(|| node_not_found(id))
    }

    /// One page of nodes with `total_pages = ceil(total / page_size)`.
    pub fn list_nodes(&self, page: u32, page_size: u32) -> Result<NodePage> {
        if page == 0 {
            return Err(GraphError::Validation("page must be >= 1".to_string()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(GraphError::Validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        let offset = u64::from(page - 1) * u64::from(page_size);
        let (items, total) = self.store()?.list_nodes(offset, page_size)?;
        let total_pages = total.div_ceil(u64::from(page_size));
        Ok(NodePage {
            items,
            total,
            page,
            page_size,
            total_pages,
        })
    }

    pub fn update_node(&self, id: i64, req: &NodeUpdate) -> Result<Node> {
        self.store()?
            .update_node(id, req.name.as_deref(), req.description.as_deref())?
            .ok_or_else(|| node_not_found(id))
    }

    pub fn delete_node(&self, id: i64) -> Result<()> {
        if self.store()?.delete_node(id)? {
            Ok(())
        } else {
            Err(node_not_found(id))
        }
    }

    // -------------------------------------------------------------------
    // Edges
    // -------------------------------------------------------------------

    pub fn create_edge(&self, req: &EdgeCreate) -> Result<Edge> {
        self.store()?.create_edge(
            req.source_node_id,
            req.target_node_id,
            req.label.as_deref(),
        )
    }

    // -------------------------------------------------------------------
    // Reachability
    // -------------------------------------------------------------------

    pub fn connected_nodes(&self, source_id: i64) -> Result<ConnectedNodesResponse> {
        let store = self.store()?;
        let connected = TraversalEngine::new(&store).connected_nodes(source_id)?;
        Ok(ConnectedNodesResponse {
            source_node_id: source_id,
            total_connected: connected.len(),
            connected_nodes: connected,
        })
    }

    // -------------------------------------------------------------------
    // Health
    // -------------------------------------------------------------------

    pub fn ping(&self) -> Result<()> {
        self.store()?.ping()
    }
}

fn node_not_found(id: i64) -> GraphError {
    GraphError::NotFound(format!("Node with id {id} not found"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
