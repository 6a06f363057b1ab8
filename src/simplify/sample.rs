use std::num::NonZeroUsize;

use crate::network::NodeId;
use super::walk::Chain;

/// Returns the chain's interior nodes we keep: positions 0, `interval`,
/// `2 * interval`, ... counted from the chain's start.
///
/// With the default interval of 4, no more than three manholes in a row are
/// skipped, and a chain of `n` PathNodes keeps `ceil(n / 4)` of them.
pub fn sample(chain: &Chain, interval: NonZeroUsize) -> impl Iterator<Item=&NodeId> {
    chain.interior.iter().step_by(interval.get())
}
