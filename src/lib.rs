//! Thins out the manholes of a sewer network for display.
//!
//! Branches and dead ends (Junctions) are always kept. Long runs of
//! manholes with exactly two pipes each (PathNodes) keep one manhole in
//! four. Pipes are never rebuilt: the output is the subset of input pipes
//! whose both ends are kept.
pub mod network;
pub mod options;
pub mod read;
pub mod simplify;
pub mod write;

pub use network::{Network, NetworkBuilder, NodeId, Pipe};
pub use options::{ColumnNames, CyclePolicy, SimplifyOptions, TableOptions};
pub use simplify::{simplify, Simplification, SimplifyStats};
