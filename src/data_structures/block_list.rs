use crate::data_structures::BoundIndex;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::mem;

/// Which block sequence a block currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seq {
    /// Blocks created by `batch_prepend`; globally small values at the front.
    D0,
    /// Blocks fed by regular `insert`s, partitioned by upper bounds that
    /// cover everything up to the absolute bound `B`.
    D1,
}

#[derive(Debug)]
struct Block<K, V> {
    items: Vec<(K, V)>,
    upper_bound: V,
    seq: Seq,
    prev: Option<u32>,
    next: Option<u32>,
}

/// Bounded block list: the batch-pull priority structure behind the BMSSP
/// recursion.
///
/// Keys map to values partitioned into two sequences of blocks of at most
/// `M` items. `insert` places a pair into the `D1` block whose upper bound
/// is the smallest one covering the value, splitting oversized blocks at
/// the median. `batch_prepend` accepts pairs known to undercut everything
/// currently stored and packs them into `D0`. `pull` extracts the `M`
/// smallest pairs from the front of both sequences and reports the next
/// threshold, amortising to O(1) per pair.
///
/// Blocks live in an arena indexed by stable ids and are threaded into
/// doubly-linked sequences, so the ordered index and the key locator stay
/// valid across mid-list insertions and removals.
#[derive(Debug)]
pub struct BlockList<K, V>
where
    K: Eq + Hash + Copy + Debug,
    V: Ord + Copy + Debug,
{
    /// Batch size parameter `M`.
    batch_size: usize,

    /// Absolute upper bound `B`; the one `D1` block carrying it is never
    /// removed.
    bound: V,

    blocks: Vec<Block<K, V>>,
    free: Vec<u32>,

    d0_head: Option<u32>,
    d0_tail: Option<u32>,
    d1_head: Option<u32>,
    d1_tail: Option<u32>,

    /// `D1` upper bounds -> block id.
    index: BoundIndex<V>,

    /// Flat key -> (block, slot) locator.
    locator: HashMap<K, (u32, usize)>,
}

impl<K, V> BlockList<K, V>
where
    K: Eq + Hash + Copy + Debug,
    V: Ord + Copy + Debug,
{
    /// Creates an empty structure holding values up to `bound`, with batch
    /// size `batch_size`.
    pub fn new(batch_size: usize, bound: V) -> Self {
        let mut list = BlockList {
            batch_size,
            bound,
            blocks: Vec::new(),
            free: Vec::new(),
            d0_head: None,
            d0_tail: None,
            d1_head: None,
            d1_tail: None,
            index: BoundIndex::new(),
            locator: HashMap::new(),
        };
        let sentinel = list.alloc(Vec::new(), bound, Seq::D1);
        list.link_before(Seq::D1, None, sentinel);
        list.index.insert(bound, sentinel);
        list
    }

    pub fn len(&self) -> usize {
        self.locator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locator.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.locator.contains_key(key)
    }

    /// Returns the stored value for a key if it is present.
    pub fn get(&self, key: &K) -> Option<V> {
        self.locator
            .get(key)
            .map(|&(block, slot)| self.blocks[block as usize].items[slot].1)
    }

    /// Inserts a key-value pair. A pair whose key is already present only
    /// takes effect when the new value is strictly smaller.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if let Some(&(block, slot)) = self.locator.get(&key) {
            if value >= self.blocks[block as usize].items[slot].1 {
                return Ok(());
            }
            self.detach(key);
        }

        let block = self
            .index
            .lower_bound(value)
            .ok_or(Error::Invariant("no insertion block covers the value"))?;
        let items = &mut self.blocks[block as usize].items;
        items.push((key, value));
        self.locator.insert(key, (block, items.len() - 1));

        if self.blocks[block as usize].items.len() > self.batch_size {
            self.split(block)?;
        }
        Ok(())
    }

    /// Inserts a batch of pairs whose values undercut every value currently
    /// stored. Duplicate keys keep their smallest value; pairs that do not
    /// improve on a stored value are dropped.
    pub fn batch_prepend(&mut self, entries: Vec<(K, V)>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut best: HashMap<K, V> = HashMap::with_capacity(entries.len());
        for (key, value) in entries {
            best.entry(key)
                .and_modify(|stored| {
                    if value < *stored {
                        *stored = value;
                    }
                })
                .or_insert(value);
        }

        let mut fresh: Vec<(K, V)> = Vec::with_capacity(best.len());
        for (key, value) in best {
            if let Some(&(block, slot)) = self.locator.get(&key) {
                if value >= self.blocks[block as usize].items[slot].1 {
                    continue;
                }
                self.detach(key);
            }
            fresh.push((key, value));
        }
        if fresh.is_empty() {
            return Ok(());
        }

        let piece = if fresh.len() <= self.batch_size {
            self.batch_size
        } else {
            (self.batch_size + 1) / 2
        };
        let mut parts = Vec::new();
        split_by_median(&mut parts, fresh, piece);

        // Parts arrive in ascending value order; prepending them back to
        // front keeps D0 maxima non-decreasing from the head.
        for part in parts.into_iter().rev() {
            let part_bound = part
                .iter()
                .map(|&(_, value)| value)
                .max()
                .ok_or(Error::Invariant("median blocking produced an empty block"))?;
            let anchor = self.d0_position(part_bound);
            let block = self.alloc(part, part_bound, Seq::D0);
            self.link_before(Seq::D0, anchor, block);
            self.register_items(block);
        }
        Ok(())
    }

    /// Extracts up to `M` keys with the smallest values and returns them
    /// together with the next threshold: every extracted value is below it,
    /// and it equals the bound `B` once the structure is drained.
    pub fn pull(&mut self) -> (Vec<K>, V) {
        let mut buffer: Vec<(K, V)> = Vec::with_capacity(2 * self.batch_size + 2);
        self.fill_from(self.d0_head, &mut buffer);
        self.fill_from(self.d1_head, &mut buffer);

        let take = if buffer.len() > self.batch_size {
            buffer.select_nth_unstable_by(self.batch_size, |a, b| a.1.cmp(&b.1));
            self.batch_size
        } else {
            buffer.len()
        };

        let mut keys = Vec::with_capacity(take);
        for &(key, _) in &buffer[..take] {
            self.detach(key);
            keys.push(key);
        }

        let threshold = if self.locator.is_empty() {
            self.bound
        } else {
            match (self.front_min(self.d0_head), self.front_min(self.d1_head)) {
                (Some(a), Some(b)) => a.min(b),
                (Some(a), None) => a,
                (None, Some(b)) => b,
                (None, None) => self.bound,
            }
        };

        (keys, threshold)
    }

    /// Removes a key if present; removing an absent key is a no-op.
    pub fn remove(&mut self, key: &K) {
        if self.locator.contains_key(key) {
            self.detach(*key);
        }
    }

    /// Number of blocks currently in each sequence, `(D0, D1)`.
    pub fn block_counts(&self) -> (usize, usize) {
        (self.count_blocks(self.d0_head), self.count_blocks(self.d1_head))
    }

    fn count_blocks(&self, head: Option<u32>) -> usize {
        let mut count = 0;
        let mut cursor = head;
        while let Some(id) = cursor {
            count += 1;
            cursor = self.blocks[id as usize].next;
        }
        count
    }

    /// Copies whole blocks from the front of a sequence into `buffer` until
    /// at least `M` items have been gathered from it.
    fn fill_from(&self, head: Option<u32>, buffer: &mut Vec<(K, V)>) {
        let mut taken = 0;
        let mut cursor = head;
        while let Some(id) = cursor {
            if taken >= self.batch_size {
                break;
            }
            let block = &self.blocks[id as usize];
            buffer.extend_from_slice(&block.items);
            taken += block.items.len();
            cursor = block.next;
        }
    }

    /// Smallest value in the front block of a sequence.
    fn front_min(&self, head: Option<u32>) -> Option<V> {
        let block = &self.blocks[head? as usize];
        block.items.iter().map(|&(_, value)| value).min()
    }

    /// First D0 block whose upper bound exceeds `value`; insertion anchor
    /// for a prepended block.
    fn d0_position(&self, value: V) -> Option<u32> {
        let mut cursor = self.d0_head;
        while let Some(id) = cursor {
            if value < self.blocks[id as usize].upper_bound {
                return Some(id);
            }
            cursor = self.blocks[id as usize].next;
        }
        None
    }

    /// Unlinks a key from its block with a swap-pop, fixing the locator for
    /// the displaced item and dropping the block once it empties. The block
    /// carrying the absolute bound survives empty.
    fn detach(&mut self, key: K) {
        let Some((block, slot)) = self.locator.remove(&key) else {
            return;
        };
        let id = block as usize;
        self.blocks[id].items.swap_remove(slot);
        if let Some(&(moved, _)) = self.blocks[id].items.get(slot) {
            self.locator.insert(moved, (block, slot));
        }

        if self.blocks[id].items.is_empty() {
            match self.blocks[id].seq {
                Seq::D0 => {
                    self.unlink(block);
                    self.release(block);
                }
                Seq::D1 => {
                    if self.blocks[id].upper_bound != self.bound {
                        self.index.remove(self.blocks[id].upper_bound, block);
                        self.unlink(block);
                        self.release(block);
                    }
                }
            }
        }
    }

    /// Splits an oversized D1 block around its median. The lower half
    /// becomes a new block in front of the original, bounded by its own
    /// maximum; the original keeps its bound and the upper half.
    fn split(&mut self, block: u32) -> Result<()> {
        let items = mem::take(&mut self.blocks[block as usize].items);
        let mut parts = Vec::with_capacity(2);
        split_by_median(&mut parts, items, self.batch_size / 2 + 1);
        if parts.len() != 2 {
            return Err(Error::Invariant("block split must yield exactly two blocks"));
        }
        let (Some(upper), Some(lower)) = (parts.pop(), parts.pop()) else {
            return Err(Error::Invariant("block split must yield exactly two blocks"));
        };

        let lower_bound = lower
            .iter()
            .map(|&(_, value)| value)
            .max()
            .ok_or(Error::Invariant("block split produced an empty block"))?;

        let new_block = self.alloc(lower, lower_bound, Seq::D1);
        self.link_before(Seq::D1, Some(block), new_block);
        self.index.insert(lower_bound, new_block);
        self.register_items(new_block);

        self.blocks[block as usize].items = upper;
        self.register_items(block);
        Ok(())
    }

    /// Points the locator at every item of a block after its slots moved.
    fn register_items(&mut self, block: u32) {
        for slot in 0..self.blocks[block as usize].items.len() {
            let key = self.blocks[block as usize].items[slot].0;
            self.locator.insert(key, (block, slot));
        }
    }

    fn alloc(&mut self, items: Vec<(K, V)>, upper_bound: V, seq: Seq) -> u32 {
        if let Some(id) = self.free.pop() {
            let block = &mut self.blocks[id as usize];
            block.items = items;
            block.upper_bound = upper_bound;
            block.seq = seq;
            block.prev = None;
            block.next = None;
            id
        } else {
            self.blocks.push(Block {
                items,
                upper_bound,
                seq,
                prev: None,
                next: None,
            });
            (self.blocks.len() - 1) as u32
        }
    }

    fn release(&mut self, block: u32) {
        self.blocks[block as usize].items = Vec::new();
        self.free.push(block);
    }

    /// Inserts a block before `anchor` in its sequence, or at the tail when
    /// no anchor is given.
    fn link_before(&mut self, seq: Seq, anchor: Option<u32>, block: u32) {
        match anchor {
            Some(after) => {
                let prev = self.blocks[after as usize].prev;
                self.blocks[block as usize].prev = prev;
                self.blocks[block as usize].next = Some(after);
                self.blocks[after as usize].prev = Some(block);
                match prev {
                    Some(p) => self.blocks[p as usize].next = Some(block),
                    None => *self.head_of(seq) = Some(block),
                }
            }
            None => {
                let tail = *self.tail_of(seq);
                self.blocks[block as usize].prev = tail;
                self.blocks[block as usize].next = None;
                match tail {
                    Some(t) => self.blocks[t as usize].next = Some(block),
                    None => *self.head_of(seq) = Some(block),
                }
                *self.tail_of(seq) = Some(block);
            }
        }
    }

    fn unlink(&mut self, block: u32) {
        let id = block as usize;
        let (prev, next, seq) = (self.blocks[id].prev, self.blocks[id].next, self.blocks[id].seq);
        match prev {
            Some(p) => self.blocks[p as usize].next = next,
            None => *self.head_of(seq) = next,
        }
        match next {
            Some(n) => self.blocks[n as usize].prev = prev,
            None => *self.tail_of(seq) = prev,
        }
    }

    fn head_of(&mut self, seq: Seq) -> &mut Option<u32> {
        match seq {
            Seq::D0 => &mut self.d0_head,
            Seq::D1 => &mut self.d1_head,
        }
    }

    fn tail_of(&mut self, seq: Seq) -> &mut Option<u32> {
        match seq {
            Seq::D0 => &mut self.d0_tail,
            Seq::D1 => &mut self.d1_tail,
        }
    }
}

/// Recursively partitions `items` by median value until no piece exceeds
/// `piece` items, appending the pieces to `out` in ascending value order.
/// A one-sided partition (all values equal to the median) is rebalanced by
/// moving a single boundary element.
fn split_by_median<K, V>(out: &mut Vec<Vec<(K, V)>>, mut items: Vec<(K, V)>, piece: usize)
where
    K: Copy,
    V: Ord + Copy,
{
    if items.len() <= piece {
        if !items.is_empty() {
            out.push(items);
        }
        return;
    }

    let mid = items.len() / 2;
    items.select_nth_unstable_by(mid, |a, b| a.1.cmp(&b.1));
    let median = items[mid].1;

    let mut lower = Vec::with_capacity(mid + 1);
    let mut upper = Vec::with_capacity(items.len() - mid + 1);
    for &(key, value) in &items {
        if value < median {
            lower.push((key, value));
        } else {
            upper.push((key, value));
        }
    }

    if lower.is_empty() {
        lower.push(upper.remove(0));
    } else if upper.is_empty() {
        if let Some(boundary) = lower.pop() {
            upper.push(boundary);
        }
    }

    split_by_median(out, lower, piece);
    split_by_median(out, upper, piece);
}
