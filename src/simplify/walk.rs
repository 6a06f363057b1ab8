//! Finds chains: maximal runs of PathNodes.
//!
//! ```ascii
//! J1---A---B---C---J2
//!      |
//!      D
//! ```
//!
//! Here `A` has three neighbors, so it is a Junction. There is one chain,
//! `[B, C]`, from `A` to `J2`. `J1` and `D` touch `A` directly, so no chain
//! leads to them.
//!
//! Each link belongs to at most one chain. We track that with a
//! ConsumedEdges value that the walk threads from chain to chain and hands
//! back to the caller when it is done.
use std::collections::btree_set::{self, BTreeSet};

use tracing::{debug, info};

use crate::network::{LinkKey, Network, NodeId};
use crate::options::CyclePolicy;
use super::classify::Classification;

/// Links already attributed to a chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsumedEdges(BTreeSet<LinkKey>);

impl ConsumedEdges {
    pub fn new() -> ConsumedEdges {
        ConsumedEdges(BTreeSet::new())
    }

    pub fn contains(&self, a: &NodeId, b: &NodeId) -> bool {
        self.0.contains(&LinkKey::new(a, b))
    }

    /// Returns `false` if the link was consumed already.
    fn consume(&mut self, a: &NodeId, b: &NodeId) -> bool {
        self.0.insert(LinkKey::new(a, b))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<LinkKey> {
        self.0.iter()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainKind {
    /// Starts at a Junction and ends at a Junction (possibly the same one).
    Run,

    /// A closed loop of PathNodes with no Junction on it.
    Cycle,
}

/// An ordered run of PathNodes.
///
/// For a `Run`, `start` is the Junction the walk left from, `interior[0]` is
/// its neighbor, and `end` is the Junction the walk arrived at.
///
/// For a `Cycle`, `start` and `end` are both the anchor -- the smallest
/// NodeId on the loop -- and `interior` lists every node of the loop,
/// beginning with the anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    pub kind: ChainKind,
    pub start: NodeId,
    pub interior: Box<[NodeId]>,
    pub end: NodeId,
}

impl Chain {
    /// Number of links this chain consumed.
    pub fn n_links(&self) -> usize {
        match self.kind {
            ChainKind::Run => self.interior.len() + 1,
            ChainKind::Cycle => self.interior.len(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainWalk {
    /// Chains in discovery order: Junctions by NodeId, then each Junction's
    /// neighbors by NodeId, then cycles by anchor.
    pub chains: Vec<Chain>,
    pub consumed: ConsumedEdges,
}

/// Returns the first neighbor of `node` (by NodeId) that isn't `prev`.
///
/// A PathNode has two distinct neighbors, so there is exactly one answer
/// when `prev` is one of them.
fn next_neighbor<'a>(network: &'a Network, node: &NodeId, prev: &NodeId) -> Option<&'a NodeId> {
    network.neighbors(node).find(|&n| n != prev)
}

/// Walks from `junction` through `first` until reaching a non-PathNode.
///
/// Consumes every link it crosses, including the last one (into the
/// terminal).
fn walk_run(network: &Network, junction: &NodeId, first: &NodeId, consumed: &mut ConsumedEdges) -> Chain {
    let mut interior = Vec::<NodeId>::new();
    let mut prev = junction;
    let mut curr = first;

    while network.degree(curr) == 2 {
        interior.push(curr.clone());
        consumed.consume(prev, curr);

        match next_neighbor(network, curr, prev) {
            None => break, // dead-end terminus
            Some(next) => {
                prev = curr;
                curr = next;
            }
        }
    }

    consumed.consume(prev, curr);

    Chain {
        kind: ChainKind::Run,
        start: junction.clone(),
        interior: interior.into_boxed_slice(),
        end: curr.clone(),
    }
}

/// Walks a Junction-free loop starting at `anchor`, heading toward its
/// smaller neighbor.
fn walk_cycle(network: &Network, anchor: &NodeId, consumed: &mut ConsumedEdges) -> Option<Chain> {
    let first = network.neighbors(anchor).next()?;

    let mut interior = vec![ anchor.clone() ];
    consumed.consume(anchor, first);

    let mut prev = anchor;
    let mut curr = first;

    while curr != anchor && network.degree(curr) == 2 {
        interior.push(curr.clone());

        match next_neighbor(network, curr, prev) {
            None => break,
            Some(next) => {
                consumed.consume(curr, next);
                prev = curr;
                curr = next;
            }
        }
    }

    Some(Chain {
        kind: ChainKind::Cycle,
        start: anchor.clone(),
        interior: interior.into_boxed_slice(),
        end: anchor.clone(),
    })
}

/// Discovers every chain in the network.
///
/// Only PathNodes appear in chain interiors. A chain between two Junctions
/// is found once, from whichever Junction sorts first: by the time the walk
/// reaches the other one, the link into the chain is consumed.
///
/// What happens to closed loops with no Junction on them depends on
/// `cycles`. With `CyclePolicy::Omit` they are never walked.
pub fn walk(network: &Network, classification: &Classification, cycles: CyclePolicy) -> ChainWalk {
    let mut consumed = ConsumedEdges::new();
    let mut chains = Vec::<Chain>::new();

    for junction in classification.junctions.iter() {
        for neighbor in network.neighbors(junction) {
            if network.degree(neighbor) == 2 && !consumed.contains(junction, neighbor) {
                let chain = walk_run(network, junction, neighbor, &mut consumed);
                debug!(start = %chain.start, end = %chain.end, len = chain.interior.len(), "found chain");
                chains.push(chain);
            }
        }
    }

    // Any PathNode with an unconsumed link now lies on a loop that no
    // Junction leads to.
    let mut n_loop_nodes: usize = 0;

    for node in classification.path_nodes.iter() {
        let untouched = network.neighbors(node).next().map_or(false, |n| !consumed.contains(node, n));
        if !untouched {
            continue;
        }

        match cycles {
            CyclePolicy::Omit => {
                n_loop_nodes += 1;
            }
            CyclePolicy::Anchor => {
                if let Some(chain) = walk_cycle(network, node, &mut consumed) {
                    debug!(anchor = %chain.start, len = chain.interior.len(), "found junction-free loop");
                    chains.push(chain);
                }
            }
        }
    }

    if n_loop_nodes > 0 {
        info!(n_loop_nodes, "left out manholes on loops with no junction");
    }

    ChainWalk { chains: chains, consumed: consumed }
}

#[cfg(test)]
mod tests {
    use crate::network::Pipe;
    use crate::simplify::classify::classify;
    use super::*;

    fn go(pipes: &[Pipe], cycles: CyclePolicy) -> ChainWalk {
        let network = Network::from_pipes(pipes);
        let classification = classify(&network);
        walk(&network, &classification, cycles)
    }

    fn path(labels: &[&str]) -> Vec<Pipe> {
        labels.windows(2).map(|w| Pipe::new(w[0], w[1])).collect()
    }

    fn names(chain: &Chain) -> Vec<&str> {
        chain.interior.iter().map(|n| n.as_str()).collect()
    }

    #[test]
    fn straight_run() {
        let result = go(&path(&[ "J1", "A", "B", "C", "D", "E", "J2" ]), CyclePolicy::Anchor);

        assert_eq!(1, result.chains.len());
        let chain = &result.chains[0];
        assert_eq!(ChainKind::Run, chain.kind);
        assert_eq!("J1", chain.start.as_str());
        assert_eq!("J2", chain.end.as_str());
        assert_eq!(vec![ "A", "B", "C", "D", "E" ], names(chain));
        assert_eq!(6, result.consumed.len());
    }

    #[test]
    fn shared_chain_found_once() {
        // Walked from "A" (it sorts first); "Z"'s attempt hits a consumed
        // link.
        let result = go(&path(&[ "Z", "m", "n", "A" ]), CyclePolicy::Anchor);

        assert_eq!(1, result.chains.len());
        assert_eq!("A", result.chains[0].start.as_str());
        assert_eq!(vec![ "n", "m" ], names(&result.chains[0]));
        assert_eq!("Z", result.chains[0].end.as_str());
    }

    #[test]
    fn junction_to_junction_has_no_chain() {
        let result = go(&[ Pipe::new("A", "B") ], CyclePolicy::Anchor);

        assert!(result.chains.is_empty());
        assert!(result.consumed.is_empty());
    }

    #[test]
    fn loop_back_to_same_junction() {
        //   a---b
        //   |   |
        //   J---c
        //   |
        //   X
        let mut pipes = path(&[ "J", "a", "b", "c", "J" ]);
        pipes.push(Pipe::new("J", "X"));

        let result = go(&pipes, CyclePolicy::Anchor);

        assert_eq!(1, result.chains.len());
        assert_eq!("J", result.chains[0].start.as_str());
        assert_eq!("J", result.chains[0].end.as_str());
        assert_eq!(vec![ "a", "b", "c" ], names(&result.chains[0]));
        assert_eq!(4, result.consumed.len());
    }

    #[test]
    fn branches_walked_in_order() {
        //        b1--b2--B
        //       /
        // c2--c1--J--a1--A
        let pipes = vec![
            Pipe::new("J", "a1"), Pipe::new("a1", "A"),
            Pipe::new("J", "b1"), Pipe::new("b1", "b2"), Pipe::new("b2", "B"),
            Pipe::new("J", "c1"), Pipe::new("c1", "c2"),
        ];

        let result = go(&pipes, CyclePolicy::Anchor);

        // "A" and "B" sort before "J", so those two chains are walked
        // toward "J"
        let interiors: Vec<Vec<&str>> = result.chains.iter().map(names).collect();
        assert_eq!(vec![ vec![ "a1" ], vec![ "b2", "b1" ], vec![ "c1" ] ], interiors);
        assert_eq!(7, result.consumed.len());
    }

    #[test]
    fn junction_free_cycle_anchored() {
        let result = go(&path(&[ "d", "b", "f", "a", "e", "c", "d" ]), CyclePolicy::Anchor);

        assert_eq!(1, result.chains.len());
        let chain = &result.chains[0];
        assert_eq!(ChainKind::Cycle, chain.kind);
        assert_eq!("a", chain.start.as_str());
        // "a" has neighbors "e" and "f": head to "e" first
        assert_eq!(vec![ "a", "e", "c", "d", "b", "f" ], names(chain));
        assert_eq!(6, result.consumed.len());
        assert_eq!(6, chain.n_links());
    }

    #[test]
    fn junction_free_cycle_omitted() {
        let result = go(&path(&[ "a", "b", "c", "a" ]), CyclePolicy::Omit);

        assert!(result.chains.is_empty());
        assert!(result.consumed.is_empty());
    }

    #[test]
    fn each_link_consumed_once() {
        let pipes = vec![
            Pipe::new("A", "p"), Pipe::new("p", "q"), Pipe::new("q", "B"),
            Pipe::new("A", "B"),
            Pipe::new("A", "C"), Pipe::new("B", "C"),
            Pipe::new("C", "r"), Pipe::new("r", "s"), Pipe::new("s", "t"), Pipe::new("t", "r2"),
            Pipe::new("x", "y"), Pipe::new("y", "z"), Pipe::new("z", "x"),
        ];

        let result = go(&pipes, CyclePolicy::Anchor);

        let total: usize = result.chains.iter().map(|c| c.n_links()).sum();
        assert_eq!(total, result.consumed.len());
        // A-B, A-C and B-C join Junctions directly
        assert_eq!(13 - 3, result.consumed.len());
    }

    #[test]
    fn deterministic() {
        let pipes = vec![
            Pipe::new("7", "3"), Pipe::new("3", "9"), Pipe::new("9", "1"),
            Pipe::new("1", "4"), Pipe::new("1", "5"), Pipe::new("5", "6"),
            Pipe::new("6", "7"), Pipe::new("7", "8"),
        ];

        let a = go(&pipes, CyclePolicy::Anchor);
        let mut reversed = pipes.clone();
        reversed.reverse();
        let b = go(&reversed, CyclePolicy::Anchor);

        assert_eq!(a, b);
    }
}
