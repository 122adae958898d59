use std::collections::BTreeSet;
use std::fmt::Debug;

/// Ordered index of `(upper_bound, block id)` tuples with a lower-bound
/// query, used to find the insertion block whose upper bound is the smallest
/// one covering a value.
///
/// Ties on the upper bound are disambiguated by block id, so two blocks may
/// momentarily share a bound without shadowing each other.
#[derive(Debug, Clone, Default)]
pub struct BoundIndex<V> {
    entries: BTreeSet<(V, u32)>,
}

impl<V> BoundIndex<V>
where
    V: Ord + Copy + Debug,
{
    pub fn new() -> Self {
        BoundIndex {
            entries: BTreeSet::new(),
        }
    }

    /// Registers a block under its upper bound.
    pub fn insert(&mut self, upper_bound: V, block: u32) -> bool {
        self.entries.insert((upper_bound, block))
    }

    /// Unregisters a block. Returns false if the entry was not present.
    pub fn remove(&mut self, upper_bound: V, block: u32) -> bool {
        self.entries.remove(&(upper_bound, block))
    }

    /// The block with the smallest upper bound that is >= `value`, if any.
    pub fn lower_bound(&self, value: V) -> Option<u32> {
        self.entries
            .range((value, u32::MIN)..)
            .next()
            .map(|&(_, block)| block)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
