use num_traits::Float;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Sentinel vertex id standing for "no vertex": absent parents and the
/// bound sentinel's node. Lies outside every dense id space `[0, N)`.
pub const NO_VERTEX: usize = usize::MAX;

/// Distance value treated as unreachable. The finite stand-in for infinity
/// is inherited from the reference implementation's fixtures.
pub fn unreachable_distance<W: Float>() -> W {
    W::from(1e7).unwrap_or_else(W::infinity)
}

/// A path to `node`: its total weight, the number of vertices on it, and
/// the predecessor the last edge came from.
///
/// Paths order lexicographically on `(length, hops, node)`, which totally
/// orders them even when several vertices sit at the same distance; the
/// recursion's thresholds rely on that. `parent` is bookkeeping for tree
/// reconstruction and takes part in neither ordering nor equality, so two
/// unreachable paths to different nodes compare unequal through the `node`
/// component alone.
#[derive(Debug, Clone, Copy)]
pub struct Path<W> {
    pub length: W,
    pub hops: u32,
    pub node: usize,
    pub parent: usize,
}

impl<W> Path<W>
where
    W: Float + Debug + Copy,
{
    /// The initial record for a vertex no path has reached yet.
    pub fn unreached(node: usize) -> Self {
        Path {
            length: unreachable_distance(),
            hops: 0,
            node,
            parent: NO_VERTEX,
        }
    }

    /// The zero-length path at the source vertex.
    pub fn source(node: usize) -> Self {
        Path {
            length: W::zero(),
            hops: 0,
            node,
            parent: NO_VERTEX,
        }
    }

    /// The maximal bound sentinel `B`; every real path is below it.
    pub fn unbounded() -> Self {
        Path {
            length: unreachable_distance(),
            hops: 0,
            node: NO_VERTEX,
            parent: NO_VERTEX,
        }
    }

    /// The candidate path obtained by following the edge `(self.node, to)`
    /// of the given weight.
    pub fn extend(&self, to: usize, weight: W) -> Self {
        Path {
            length: self.length + weight,
            hops: self.hops + 1,
            node: to,
            parent: self.node,
        }
    }
}

impl<W: Ord> PartialEq for Path<W> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.hops == other.hops && self.node == other.node
    }
}

impl<W: Ord> Eq for Path<W> {}

impl<W: Ord> PartialOrd for Path<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Ord> Ord for Path<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length
            .cmp(&other.length)
            .then_with(|| self.hops.cmp(&other.hops))
            .then_with(|| self.node.cmp(&other.node))
    }
}
