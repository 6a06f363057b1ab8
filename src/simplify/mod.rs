//! Picks the manholes worth drawing.
//!
//! Junctions -- branches, dead ends, isolated manholes -- are always kept.
//! Along each chain of PathNodes between them we keep one manhole, skip
//! three, keep one, and so on.
//!
//! Nothing is moved or merged. The output pipes are the input pipes whose
//! both ends are kept: geometry always comes from the original data.
//!
//! # Examples
//!
//! ```
//! use sewergrid::{simplify, Pipe, SimplifyOptions};
//!
//! // J1--A--B--C--D--E--J2
//! let pipes = vec![
//!     Pipe::new("J1", "A"), Pipe::new("A", "B"), Pipe::new("B", "C"),
//!     Pipe::new("C", "D"), Pipe::new("D", "E"), Pipe::new("E", "J2"),
//! ];
//!
//! let result = simplify(&pipes, &SimplifyOptions::default());
//!
//! let kept: Vec<&str> = result.necessary.iter().map(|n| n.as_str()).collect();
//! assert_eq!(vec![ "A", "E", "J1", "J2" ], kept);
//! assert_eq!(vec![ Pipe::new("J1", "A"), Pipe::new("E", "J2") ], result.pipes.into_vec());
//! ```
use std::collections::BTreeSet;

use tracing::info;

use crate::network::{BuildStats, NetworkBuilder, NodeId, Pipe};
use crate::options::SimplifyOptions;

mod classify;
mod sample;
mod walk;

pub use self::classify::{classify, Classification, Role};
pub use self::sample::sample;
pub use self::walk::{walk, Chain, ChainKind, ChainWalk, ConsumedEdges};

/// Numbers worth reporting about one simplification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimplifyStats {
    pub build: BuildStats,
    pub n_nodes: usize,
    pub n_junctions: usize,
    pub n_path_nodes: usize,
    pub n_chains: usize,
    pub n_necessary: usize,
    pub n_input_pipes: usize,
    pub n_output_pipes: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Simplification {
    /// Every manhole to keep: all Junctions plus sampled PathNodes.
    pub necessary: BTreeSet<NodeId>,

    /// Input pipes with both ends in `necessary`, in input order.
    pub pipes: Box<[Pipe]>,

    pub junctions: BTreeSet<NodeId>,
    pub chains: Box<[Chain]>,
    pub consumed: ConsumedEdges,
    pub stats: SimplifyStats,
}

impl Simplification {
    pub fn keeps_node(&self, node: &NodeId) -> bool {
        self.necessary.contains(node)
    }

    /// `true` iff both ends of `pipe` are kept.
    pub fn keeps_pipe(&self, pipe: &Pipe) -> bool {
        self.keeps_node(&pipe.0) && self.keeps_node(&pipe.1)
    }
}

/// Returns the manholes to keep and the pipes between them.
///
/// Never fails: an empty pipe list gives an empty result.
pub fn simplify(pipes: &[Pipe], options: &SimplifyOptions) -> Simplification {
    let mut builder = NetworkBuilder::new();
    builder.add_pipes(pipes);
    let build_stats = builder.stats();
    let network = builder.into_network();

    info!(n_nodes = network.n_nodes(), n_links = network.n_links(), "built network");

    let classification = classify(&network);
    let ChainWalk { chains, consumed } = walk(&network, &classification, options.cycles);

    let mut necessary = classification.junctions.clone();
    for chain in chains.iter() {
        necessary.extend(sample(chain, options.sample_interval).cloned());
    }

    let kept_pipes: Vec<Pipe> = pipes.iter()
        .filter(|p| necessary.contains(&p.0) && necessary.contains(&p.1))
        .cloned()
        .collect();

    let stats = SimplifyStats {
        build: build_stats,
        n_nodes: network.n_nodes(),
        n_junctions: classification.junctions.len(),
        n_path_nodes: classification.path_nodes.len(),
        n_chains: chains.len(),
        n_necessary: necessary.len(),
        n_input_pipes: pipes.len(),
        n_output_pipes: kept_pipes.len(),
    };

    info!(
        n_junctions = stats.n_junctions,
        n_chains = stats.n_chains,
        n_necessary = stats.n_necessary,
        n_output_pipes = stats.n_output_pipes,
        "simplified network"
    );

    Simplification {
        necessary: necessary,
        pipes: kept_pipes.into_boxed_slice(),
        junctions: classification.junctions,
        chains: chains.into_boxed_slice(),
        consumed: consumed,
        stats: stats,
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use crate::options::CyclePolicy;
    use super::*;

    fn ids(v: &[&str]) -> BTreeSet<NodeId> {
        v.iter().map(|&s| NodeId::from(s)).collect()
    }

    fn path(labels: &[&str]) -> Vec<Pipe> {
        labels.windows(2).map(|w| Pipe::new(w[0], w[1])).collect()
    }

    fn go(pipes: &[Pipe]) -> Simplification {
        simplify(pipes, &SimplifyOptions::default())
    }

    #[test]
    fn worked_example() {
        let result = go(&path(&[ "J1", "A", "B", "C", "D", "E", "J2" ]));

        assert_eq!(ids(&[ "J1", "J2", "A", "E" ]), result.necessary);
        assert_eq!(vec![ Pipe::new("J1", "A"), Pipe::new("E", "J2") ], result.pipes.to_vec());
        assert_eq!(1, result.chains.len());
    }

    #[test]
    fn empty_input() {
        let result = go(&[]);

        assert!(result.necessary.is_empty());
        assert!(result.pipes.is_empty());
        assert!(result.chains.is_empty());
        assert_eq!(SimplifyStats::default(), result.stats);
    }

    #[test]
    fn two_junctions() {
        let result = go(&[ Pipe::new("A", "B") ]);

        assert_eq!(ids(&[ "A", "B" ]), result.necessary);
        assert!(result.chains.is_empty());
        assert_eq!(1, result.pipes.len());
    }

    #[test]
    fn all_junctions() {
        // star: every spoke is a dead end
        let pipes = vec![ Pipe::new("H", "1"), Pipe::new("H", "2"), Pipe::new("H", "3") ];
        let result = go(&pipes);

        assert_eq!(ids(&[ "H", "1", "2", "3" ]), result.necessary);
        assert_eq!(pipes, result.pipes.to_vec());
    }

    #[test]
    fn self_loop_is_isolated_junction() {
        let result = go(&[ Pipe::new("A", "A") ]);

        assert_eq!(ids(&[ "A" ]), result.necessary);
        assert_eq!(vec![ Pipe::new("A", "A") ], result.pipes.to_vec());
        assert_eq!(1, result.stats.build.n_self_loops);
    }

    #[test]
    fn duplicates_kept_in_output() {
        let pipes = vec![ Pipe::new("A", "B"), Pipe::new("B", "A") ];
        let result = go(&pipes);

        assert_eq!(pipes, result.pipes.to_vec());
        assert_eq!(1, result.stats.build.n_duplicates);
    }

    #[test]
    fn junction_free_loop() {
        let pipes = path(&[ "a", "b", "c", "d", "e", "f", "a" ]);

        let anchored = go(&pipes);
        // walk: a, b, c, d, e, f
        assert_eq!(ids(&[ "a", "e" ]), anchored.necessary);

        let omitted = simplify(&pipes, &SimplifyOptions { cycles: CyclePolicy::Omit, ..SimplifyOptions::default() });
        assert!(omitted.necessary.is_empty());
        assert!(omitted.pipes.is_empty());
    }

    #[test]
    fn custom_interval() {
        let options = SimplifyOptions {
            sample_interval: NonZeroUsize::new(2).unwrap(),
            ..SimplifyOptions::default()
        };
        let result = simplify(&path(&[ "J1", "A", "B", "C", "D", "E", "J2" ]), &options);

        assert_eq!(ids(&[ "J1", "J2", "A", "C", "E" ]), result.necessary);
    }

    #[test]
    fn junctions_always_kept() {
        let pipes = vec![
            Pipe::new("A", "p1"), Pipe::new("p1", "p2"), Pipe::new("p2", "p3"),
            Pipe::new("p3", "p4"), Pipe::new("p4", "p5"), Pipe::new("p5", "B"),
            Pipe::new("A", "C"), Pipe::new("A", "D"),
            Pipe::new("B", "E"), Pipe::new("B", "F"),
        ];
        let result = go(&pipes);

        assert!(result.junctions.is_subset(&result.necessary));
        assert_eq!(ids(&[ "A", "B", "C", "D", "E", "F" ]), result.junctions);
        assert!(result.pipes.iter().all(|p| result.keeps_pipe(p)));
        assert!(result.pipes.iter().all(|p| pipes.contains(p)));
    }
}
