use std::collections::BTreeSet;

use crate::network::{Network, NodeId};

/// How a manhole is treated when simplifying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Degree ≠ 2: a branch, a dead end or an isolated manhole. Always kept.
    Junction,

    /// Degree == 2: one pipe in, one pipe out. May be thinned out.
    PathNode,
}

impl Role {
    pub fn of(degree: usize) -> Role {
        if degree == 2 { Role::PathNode } else { Role::Junction }
    }
}

/// Every node of a Network, split by Role.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub junctions: BTreeSet<NodeId>,
    pub path_nodes: BTreeSet<NodeId>,
}

impl Classification {
    pub fn role(&self, node: &NodeId) -> Option<Role> {
        if self.junctions.contains(node) {
            Some(Role::Junction)
        } else if self.path_nodes.contains(node) {
            Some(Role::PathNode)
        } else {
            None
        }
    }
}

pub fn classify(network: &Network) -> Classification {
    let mut ret = Classification::default();

    for node in network.nodes() {
        match Role::of(network.degree(node)) {
            Role::Junction => ret.junctions.insert(node.clone()),
            Role::PathNode => ret.path_nodes.insert(node.clone()),
        };
    }

    ret
}
