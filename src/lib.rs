//! graphnav — directed graph service.
//!
//! Stores nodes and labeled directed edges in SQLite and exposes CRUD plus
//! a reachability query (all nodes transitively reachable from a source,
//! annotated with minimum hop distance) over a REST API.

pub mod api;
pub mod cli;
pub mod db;
pub mod error;
pub mod graph;
pub mod observability;
pub mod seed;
pub mod types;
