use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A manhole label.
///
/// NodeIds are ordered by their string. Every traversal in this crate visits
/// nodes in that order, so the same input always gives the same output.
#[derive(Clone, Debug, Hash, Ord, Eq, PartialEq, PartialOrd)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'a> From<&'a str> for NodeId {
    fn from(s: &'a str) -> NodeId {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> NodeId {
        NodeId(s)
    }
}

/// A pipe joining two manholes.
///
/// The order is the order the pipe table lists them in (start, stop). It
/// carries no flow direction: the Network treats `Pipe(a, b)` and
/// `Pipe(b, a)` as the same link.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Pipe(pub NodeId, pub NodeId);

impl Pipe {
    pub fn new<A: Into<NodeId>, B: Into<NodeId>>(start: A, stop: B) -> Pipe {
        Pipe(start.into(), stop.into())
    }

    pub fn is_self_loop(&self) -> bool {
        self.0 == self.1
    }

    /// The direction-less key of this pipe: smaller NodeId first.
    pub fn key(&self) -> LinkKey {
        LinkKey::new(&self.0, &self.1)
    }
}

impl fmt::Display for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// A direction-less link between two nodes, stored smaller-NodeId-first so
/// `(a, b)` and `(b, a)` hash and compare equal.
#[derive(Clone, Debug, Hash, Ord, Eq, PartialEq, PartialOrd)]
pub struct LinkKey(pub NodeId, pub NodeId);

impl LinkKey {
    pub fn new(a: &NodeId, b: &NodeId) -> LinkKey {
        if a <= b {
            LinkKey(a.clone(), b.clone())
        } else {
            LinkKey(b.clone(), a.clone())
        }
    }
}

/// An undirected simple graph of manholes and pipes.
///
/// Each node maps to the ordered set of its distinct neighbors. A Network
/// never changes once built: build one with `NetworkBuilder` or
/// `Network::from_pipes()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Network {
    pub(super) adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Network {
    /// Number of distinct neighbors. Unknown nodes have degree 0.
    pub fn degree(&self, node: &NodeId) -> usize {
        self.adjacency.get(node).map_or(0, |n| n.len())
    }

    /// Neighbors of `node`, in NodeId order.
    pub fn neighbors<'a>(&'a self, node: &NodeId) -> impl Iterator<Item=&'a NodeId> + 'a {
        self.adjacency.get(node).into_iter().flat_map(|n| n.iter())
    }

    /// All nodes, in NodeId order.
    pub fn nodes(&self) -> impl Iterator<Item=&NodeId> {
        self.adjacency.keys()
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn has_link(&self, a: &NodeId, b: &NodeId) -> bool {
        self.adjacency.get(a).map_or(false, |n| n.contains(b))
    }

    pub fn n_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct links (duplicates collapsed).
    pub fn n_links(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
