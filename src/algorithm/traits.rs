use crate::algorithm::path::{unreachable_distance, NO_VERTEX};
use crate::graph::Graph;
use crate::Result;
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Result of a shortest path algorithm execution.
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Distance from the source to each vertex; `unreachable_distance()`
    /// marks vertices no path reaches.
    pub distances: Vec<W>,

    /// Predecessor of each vertex in the shortest path tree; `NO_VERTEX`
    /// for the source and for unreachable vertices.
    pub predecessors: Vec<usize>,

    /// Source vertex ID
    pub source: usize,
}

impl<W> ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distances[vertex] < unreachable_distance()
    }

    /// Reconstructs the path from the source to `target` as a vertex
    /// sequence, or `None` when the target is unreachable or the
    /// predecessor chain is broken.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if target >= self.predecessors.len() || !self.is_reachable(target) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = target;
        while current != self.source {
            path.push(current);
            let pred = self.predecessors[current];
            if pred == NO_VERTEX {
                return None;
            }
            // A predecessor chain longer than the vertex count means a cycle.
            if path.len() > self.predecessors.len() {
                log::warn!("cycle detected while reconstructing the path to {target}");
                return None;
            }
            current = pred;
        }
        path.push(self.source);
        path.reverse();
        Some(path)
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}
