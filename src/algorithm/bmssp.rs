use crate::algorithm::path::{Path, NO_VERTEX};
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::BlockList;
use crate::graph::{ConstantDegree, Graph};
use crate::{Error, Result};
use log::debug;
use num_traits::{Float, Zero};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// Marker for "not completed at any level yet".
const NO_LEVEL: usize = usize::MAX;

/// `2^exp`, saturating instead of wrapping for out-of-range exponents.
fn pow2(exp: usize) -> usize {
    1usize.checked_shl(exp as u32).unwrap_or(usize::MAX)
}

/// Derives the recursion parameters `(k, t, l)` from the vertex count, all
/// clamped to at least 1 so degenerate graph sizes stay well-defined.
fn derive_parameters(vertex_count: usize) -> (usize, usize, usize) {
    let log_n = (vertex_count.max(2) as f64).log2();
    let k = (log_n.powf(1.0 / 3.0).floor() as usize).max(1);
    let t = (log_n.powf(2.0 / 3.0).floor() as usize).max(1);
    let levels = ((log_n / t as f64).ceil() as usize).max(1);
    (k, t, levels)
}

/// Mutable search state threaded through one top-level run: the per-vertex
/// path records plus the scratch structures of the pivot finder and the
/// base case. The stamp arrays are reused across calls by bumping a
/// generation token instead of clearing.
struct SearchState<'a, W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    graph: &'a G,

    /// Best known path per vertex; lex-monotone non-increasing.
    paths: Vec<Path<W>>,

    /// Tight-edge successors per vertex, rewritten for the frontier of each
    /// pivot search.
    forest: Vec<Vec<usize>>,

    /// Tight-edge parent counts within the same frontier.
    in_degree: Vec<u32>,

    /// Level at which a vertex was last completed, `NO_LEVEL` if never.
    completed: Vec<usize>,

    w_mark: Vec<u64>,
    layer_mark: Vec<u64>,
    visit_mark: Vec<u64>,
    token: u64,
}

impl<'a, W, G> SearchState<'a, W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn new(graph: &'a G, source: usize) -> Self {
        let n = graph.vertex_count();
        let mut paths: Vec<Path<W>> = (0..n).map(Path::unreached).collect();
        paths[source] = Path::source(source);
        SearchState {
            graph,
            paths,
            forest: vec![Vec::new(); n],
            in_degree: vec![0; n],
            completed: vec![NO_LEVEL; n],
            w_mark: vec![0; n],
            layer_mark: vec![0; n],
            visit_mark: vec![0; n],
            token: 0,
        }
    }

    fn next_token(&mut self) -> u64 {
        self.token += 1;
        self.token
    }

    /// Finds the pivots of `sources` below `bound`: runs `k` relaxation
    /// layers, collecting the frontier `W`, and keeps the sources whose
    /// tight-edge subtree within `W` reaches `k` vertices. Returns early
    /// with every source as a pivot once `|W| > k * |S|`.
    fn find_pivots(
        &mut self,
        k: usize,
        bound: &Path<W>,
        sources: &[usize],
    ) -> (Vec<usize>, Vec<usize>) {
        let graph = self.graph;
        let w_token = self.next_token();

        let mut frontier: Vec<usize> = Vec::with_capacity(sources.len());
        for &u in sources {
            if self.w_mark[u] != w_token {
                self.w_mark[u] = w_token;
                self.forest[u].clear();
                self.in_degree[u] = 0;
                frontier.push(u);
            }
        }

        let mut current = sources.to_vec();
        for _ in 0..k {
            let layer_token = self.next_token();
            let mut next = Vec::new();
            for &u in &current {
                for (v, weight) in graph.outgoing_edges(u) {
                    let candidate = self.paths[u].extend(v, weight);
                    if candidate <= self.paths[v] {
                        if candidate < self.paths[v] {
                            self.paths[v] = candidate;
                        }
                        if candidate < *bound {
                            if self.layer_mark[v] != layer_token {
                                self.layer_mark[v] = layer_token;
                                next.push(v);
                            }
                            if self.w_mark[v] != w_token {
                                self.w_mark[v] = w_token;
                                self.forest[v].clear();
                                self.in_degree[v] = 0;
                                frontier.push(v);
                            }
                        }
                    }
                }
            }
            if frontier.len() > k.saturating_mul(sources.len()) {
                return (sources.to_vec(), frontier);
            }
            if next.is_empty() {
                break;
            }
            current = next;
        }

        // Tight-edge forest over the frontier; equal-length paths can make
        // it a general graph rather than a tree.
        for i in 0..frontier.len() {
            let u = frontier[i];
            for (v, weight) in graph.outgoing_edges(u) {
                let candidate = self.paths[u].extend(v, weight);
                if self.w_mark[v] == w_token && self.paths[v] == candidate {
                    self.forest[u].push(v);
                    self.in_degree[v] += 1;
                }
            }
        }

        let mut pivots = Vec::new();
        for &u in sources {
            if self.in_degree[u] == 0 && self.subtree_reaches(u, k) {
                pivots.push(u);
            }
        }
        (pivots, frontier)
    }

    /// Whether the tight-edge subtree under `root` contains at least `k`
    /// vertices, stopping the walk as soon as the count is reached.
    fn subtree_reaches(&mut self, root: usize, k: usize) -> bool {
        if k >= 2 && self.forest[root].is_empty() {
            return false;
        }

        let token = self.next_token();
        let mut stack = vec![root];
        let mut count = 0;
        while let Some(u) = stack.pop() {
            if self.visit_mark[u] == token {
                continue;
            }
            self.visit_mark[u] = token;
            count += 1;
            if count >= k {
                return true;
            }
            for &v in &self.forest[u] {
                if self.visit_mark[v] != token {
                    stack.push(v);
                }
            }
        }
        false
    }

    /// Bounded Dijkstra from a singleton source: settles at most `k + 1`
    /// distinct vertices below `bound`. With `k` or fewer settled the bound
    /// is returned unchanged; otherwise the largest settled path becomes
    /// the new boundary and its vertex is dropped from the settled set.
    fn base_case(
        &mut self,
        k: usize,
        bound: &Path<W>,
        sources: &[usize],
    ) -> Result<(Path<W>, Vec<usize>)> {
        if sources.len() != 1 {
            return Err(Error::Precondition("base case requires a singleton source set"));
        }

        let graph = self.graph;
        let settled_token = self.next_token();
        let mut heap = BinaryHeap::new();
        heap.push(Reverse(self.paths[sources[0]]));

        let mut settled = Vec::with_capacity(k + 1);
        while settled.len() < k + 1 {
            let Some(Reverse(current)) = heap.pop() else {
                break;
            };
            let u = current.node;
            if self.paths[u] > current || self.visit_mark[u] == settled_token {
                continue;
            }
            self.visit_mark[u] = settled_token;
            settled.push(u);

            for (v, weight) in graph.outgoing_edges(u) {
                let candidate = self.paths[u].extend(v, weight);
                if candidate <= self.paths[v] && candidate < *bound {
                    if candidate < self.paths[v] {
                        self.paths[v] = candidate;
                    }
                    heap.push(Reverse(candidate));
                }
            }
        }

        if settled.len() <= k {
            return Ok((*bound, settled));
        }
        let boundary = settled
            .pop()
            .map(|last| self.paths[last])
            .unwrap_or(*bound);
        Ok((boundary, settled))
    }

    /// The bounded multi-source recursion. Returns the boundary `B'`
    /// certifying every vertex with a path below it has been settled,
    /// together with the settled set of this call.
    fn bmssp(
        &mut self,
        t: usize,
        k: usize,
        level: usize,
        bound: &Path<W>,
        sources: &[usize],
    ) -> Result<(Path<W>, Vec<usize>)> {
        if sources.len() > pow2(level.saturating_mul(t)) {
            return Err(Error::Precondition("source set exceeds the level capacity"));
        }
        if level == 0 {
            return self.base_case(k, bound, sources);
        }

        let graph = self.graph;
        let (pivots, frontier) = self.find_pivots(k, bound, sources);

        let batch_size = pow2((level - 1).saturating_mul(t));
        let mut queue: BlockList<usize, Path<W>> = BlockList::new(batch_size, *bound);
        let mut boundary = *bound;
        for &x in &pivots {
            queue.insert(x, self.paths[x])?;
            if self.paths[x] < boundary {
                boundary = self.paths[x];
            }
        }

        let max_settled = k.saturating_mul(pow2(level.saturating_mul(t)));
        let mut settled: Vec<usize> = Vec::new();

        while settled.len() < max_settled && !queue.is_empty() {
            let (batch, batch_bound) = queue.pull();

            let previous = boundary;
            let (sub_boundary, sub_settled) = self.bmssp(t, k, level - 1, &batch_bound, &batch)?;
            if sub_boundary < previous {
                return Err(Error::Invariant("recursion boundary regressed"));
            }
            boundary = sub_boundary;

            let mut carry: Vec<(usize, Path<W>)> = Vec::new();
            for &u in &sub_settled {
                settled.push(u);
                self.completed[u] = level;
                queue.remove(&u);

                for (v, weight) in graph.outgoing_edges(u) {
                    let candidate = self.paths[u].extend(v, weight);
                    if candidate <= self.paths[v] {
                        if candidate < self.paths[v] {
                            self.paths[v] = candidate;
                        }
                        if batch_bound <= candidate && candidate < *bound {
                            queue.insert(v, candidate)?;
                        } else if boundary <= candidate && candidate < batch_bound {
                            carry.push((v, candidate));
                        }
                    }
                }
            }
            for &x in &batch {
                if boundary <= self.paths[x] && self.paths[x] < batch_bound {
                    carry.push((x, self.paths[x]));
                }
            }
            queue.batch_prepend(carry)?;
        }

        if *bound < boundary {
            boundary = *bound;
        }
        for &x in &frontier {
            if self.paths[x] < boundary && self.completed[x] != level {
                settled.push(x);
            }
        }
        Ok((boundary, settled))
    }
}

/// Runs the full recursion on `graph` and returns the final path records.
fn solve<W, G>(graph: &G, source: usize) -> Result<Vec<Path<W>>>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    let n = graph.vertex_count();
    let (k, t, levels) = derive_parameters(n);
    debug!(
        "bmssp on {} vertices / {} edges: k={}, t={}, l={}",
        n,
        graph.edge_count(),
        k,
        t,
        levels
    );

    let mut state = SearchState::new(graph, source);
    let bound = Path::unbounded();
    state.bmssp(t, k, levels, &bound, &[source])?;
    Ok(state.paths)
}

/// The O(m log^(2/3) n) single-source shortest path algorithm: rewrites the
/// graph to constant degree, runs the bounded multi-source recursion on the
/// rewritten graph, and maps the results back to the original id space.
#[derive(Debug)]
pub struct Bmssp {
    /// Whether to rewrite the input to in/out-degree <= 2 first. The
    /// recursion is correct either way; the complexity bound needs it.
    degree_reduction: bool,
}

impl Bmssp {
    pub fn new() -> Self {
        Bmssp {
            degree_reduction: true,
        }
    }

    /// Toggles the constant-degree rewrite.
    pub fn with_degree_reduction(mut self, enabled: bool) -> Self {
        self.degree_reduction = enabled;
        self
    }

    /// Extracts per-vertex distances and parents for the original id space.
    /// Original ids survive the rewrite as the first node of each expansion
    /// cycle, so distances map through directly; parents walk out of the
    /// zero-weight cycle before being translated.
    fn map_back<W>(paths: &[Path<W>], mapping: &ConstantDegree) -> (Vec<W>, Vec<usize>)
    where
        W: Float + Zero + Debug + Copy + Ord,
    {
        let n = mapping.original_count();
        let mut distances = Vec::with_capacity(n);
        let mut predecessors = Vec::with_capacity(n);
        for v in 0..n {
            distances.push(paths[v].length);
            let mut pred = paths[v].parent;
            while pred != NO_VERTEX && mapping.owner_of(pred) == v {
                pred = paths[pred].parent;
            }
            predecessors.push(if pred == NO_VERTEX {
                NO_VERTEX
            } else {
                mapping.owner_of(pred)
            });
        }
        (distances, predecessors)
    }
}

impl Default for Bmssp {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Bmssp
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "BMSSP (O(m log^(2/3) n))"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }
        for u in 0..graph.vertex_count() {
            for (v, weight) in graph.outgoing_edges(u) {
                if weight < W::zero() {
                    return Err(Error::NegativeWeight(u, v));
                }
            }
        }

        if self.degree_reduction {
            let (reduced, mapping) = ConstantDegree::transform(graph);
            let paths = solve(&reduced, source)?;
            let (distances, predecessors) = Self::map_back(&paths, &mapping);
            Ok(ShortestPathResult {
                distances,
                predecessors,
                source,
            })
        } else {
            let paths = solve(graph, source)?;
            Ok(ShortestPathResult {
                distances: paths.iter().map(|p| p.length).collect(),
                predecessors: paths.iter().map(|p| p.parent).collect(),
                source,
            })
        }
    }
}

/// Computes single-source shortest paths on a directed non-negative graph,
/// returning the distance and parent vectors. Unreachable vertices keep
/// `unreachable_distance()` and `NO_VERTEX`.
pub fn compute_sssp<W, G>(graph: &G, source: usize) -> Result<(Vec<W>, Vec<usize>)>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    let result = Bmssp::new().compute_shortest_paths(graph, source)?;
    Ok((result.distances, result.predecessors))
}
