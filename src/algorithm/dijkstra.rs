use crate::algorithm::path::{unreachable_distance, NO_VERTEX};
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::Graph;
use crate::{Error, Result};
use num_traits::{Float, Zero};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// Classic binary-heap Dijkstra. Serves as the correctness oracle the
/// recursion is tested against.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra (binary heap)"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }

        let n = graph.vertex_count();
        let mut distances = vec![unreachable_distance(); n];
        let mut predecessors = vec![NO_VERTEX; n];
        distances[source] = W::zero();

        let mut queue = BinaryHeap::new();
        queue.push(Reverse((W::zero(), source)));

        while let Some(Reverse((dist_u, u))) = queue.pop() {
            if dist_u > distances[u] {
                continue;
            }

            for (v, weight) in graph.outgoing_edges(u) {
                let new_dist = dist_u + weight;
                if new_dist < distances[v] {
                    distances[v] = new_dist;
                    predecessors[v] = u;
                    queue.push(Reverse((new_dist, v)));
                }
            }
        }

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
        })
    }
}
