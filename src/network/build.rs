use std::collections::btree_map::{BTreeMap, Entry};
use std::collections::BTreeSet;

use tracing::warn;

use super::types::{Network, NodeId, Pipe};

/// What happened to the pipes handed to a NetworkBuilder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Pipes that added a new link.
    pub n_links: usize,
    /// Pipes whose link was already present (either direction).
    pub n_duplicates: usize,
    /// Pipes that start and stop at the same manhole.
    pub n_self_loops: usize,
}

pub struct NetworkBuilder {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
    stats: BuildStats,
}

impl NetworkBuilder {
    pub fn new() -> NetworkBuilder {
        NetworkBuilder {
            adjacency: BTreeMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Adds a manhole with no pipes (yet).
    pub fn add_node(&mut self, node: &NodeId) {
        self.neighbors_mut(node);
    }

    /// Adds a pipe, linking both ends.
    ///
    /// A duplicate pipe (same ends, either order) changes nothing: the
    /// Network is a simple graph.
    ///
    /// A self-loop registers its manhole but adds no link: a dead end with a
    /// loop on it is still a dead end.
    pub fn add_pipe(&mut self, pipe: &Pipe) {
        let Pipe(ref a, ref b) = *pipe;

        if a == b {
            warn!(node = %a, "ignoring self-loop pipe");
            self.stats.n_self_loops += 1;
            self.add_node(a);
            return;
        }

        let is_new = self.neighbors_mut(a).insert(b.clone());
        self.neighbors_mut(b).insert(a.clone());

        if is_new {
            self.stats.n_links += 1;
        } else {
            self.stats.n_duplicates += 1;
        }
    }

    pub fn add_pipes<'a, T: IntoIterator<Item=&'a Pipe>>(&mut self, pipes: T) {
        for pipe in pipes {
            self.add_pipe(pipe);
        }
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    fn neighbors_mut(&mut self, node: &NodeId) -> &mut BTreeSet<NodeId> {
        // Entry API: insert-or-get without cloning the key when it's there
        match self.adjacency.entry(node.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(BTreeSet::new()),
        }
    }

    pub fn into_network(self) -> Network {
        Network { adjacency: self.adjacency }
    }
}

impl Default for NetworkBuilder {
    fn default() -> NetworkBuilder {
        NetworkBuilder::new()
    }
}

impl Network {
    /// Builds a Network from a pipe list.
    pub fn from_pipes(pipes: &[Pipe]) -> Network {
        let mut builder = NetworkBuilder::new();
        builder.add_pipes(pipes);
        builder.into_network()
    }
}
