//! The pipe network as an undirected simple graph.
//!
//! Manholes are nodes, pipes are links. Parallel pipes between the same two
//! manholes collapse into one link: simplification only cares about _which_
//! manholes touch, not how many pipes join them.
mod build;
mod types;

pub use self::build::{BuildStats, NetworkBuilder};
pub use self::types::{LinkKey, Network, NodeId, Pipe};
