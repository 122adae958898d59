use crate::graph::traits::{Graph, MutableGraph};
use crate::graph::DirectedGraph;
use log::debug;
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Rewrites a digraph so that every vertex has in-degree <= 2 and
/// out-degree <= 2, as required by the BMSSP recursion.
///
/// A vertex whose combined degree exceeds 3 (or either degree exceeds 2) is
/// replaced by a directed zero-weight cycle containing one "send" node per
/// outgoing edge followed by one "receive" node per incoming edge. The first
/// cycle node reuses the original vertex id, so distances computed on the
/// rewritten graph can be read off at the original ids directly. Each
/// original edge is routed from the send node of its tail to the receive
/// node of its head (or to the plain endpoint when that endpoint was not
/// expanded), so it traverses exactly one send -> receive link and shortest
/// path lengths between original vertices are preserved.
#[derive(Debug, Clone)]
pub struct ConstantDegree {
    /// Number of vertices in the graph that was rewritten.
    original_count: usize,

    /// Maps every rewritten vertex id to the original vertex it stands for.
    owner: Vec<usize>,
}

impl ConstantDegree {
    /// Rewrites `graph` and returns the bounded-degree graph together with
    /// the vertex ownership map.
    pub fn transform<W, G>(graph: &G) -> (DirectedGraph<W>, ConstantDegree)
    where
        W: Float + Zero + Debug + Copy,
        G: Graph<W>,
    {
        let n = graph.vertex_count();

        let mut out_degree = vec![0usize; n];
        let mut in_degree = vec![0usize; n];
        for u in 0..n {
            for (v, _) in graph.outgoing_edges(u) {
                out_degree[u] += 1;
                in_degree[v] += 1;
            }
        }

        let expanded =
            |v: usize| out_degree[v] + in_degree[v] > 3 || out_degree[v] > 2 || in_degree[v] > 2;

        // Allocate ids: the first cycle node of an expanded vertex keeps the
        // original id, the rest are appended after the original id space.
        let mut owner: Vec<usize> = (0..n).collect();
        let mut send = vec![Vec::new(); n];
        let mut receive = vec![Vec::new(); n];
        let mut next_id = n;
        for v in 0..n {
            if !expanded(v) {
                continue;
            }
            let cycle_len = out_degree[v] + in_degree[v];
            let mut cycle = Vec::with_capacity(cycle_len);
            cycle.push(v);
            for _ in 1..cycle_len {
                cycle.push(next_id);
                owner.push(v);
                next_id += 1;
            }
            receive[v] = cycle.split_off(out_degree[v]);
            send[v] = cycle;
        }

        let mut result = DirectedGraph::with_capacity(next_id);

        // Zero-weight cycles tie each expanded vertex's nodes together.
        for v in 0..n {
            if !expanded(v) {
                continue;
            }
            let cycle_len = send[v].len() + receive[v].len();
            let node_at = |i: usize| {
                let sends = send[v].len();
                if i < sends {
                    send[v][i]
                } else {
                    receive[v][i - sends]
                }
            };
            for i in 0..cycle_len {
                result.add_edge(node_at(i), node_at((i + 1) % cycle_len), W::zero());
            }
        }

        // Route every original edge through the expansion nodes.
        let mut receive_slot = vec![0usize; n];
        for u in 0..n {
            for (i, (v, weight)) in graph.outgoing_edges(u).enumerate() {
                let from = if expanded(u) { send[u][i] } else { u };
                let to = if expanded(v) {
                    let slot = receive_slot[v];
                    receive_slot[v] += 1;
                    receive[v][slot]
                } else {
                    v
                };
                result.add_edge(from, to, weight);
            }
        }

        debug!(
            "constant-degree rewrite: {} vertices -> {} vertices, {} edges -> {} edges",
            n,
            next_id,
            graph.edge_count(),
            result.edge_count()
        );

        (
            result,
            ConstantDegree {
                original_count: n,
                owner,
            },
        )
    }

    /// Number of vertices in the graph before the rewrite.
    pub fn original_count(&self) -> usize {
        self.original_count
    }

    /// Number of vertices in the rewritten graph.
    pub fn transformed_count(&self) -> usize {
        self.owner.len()
    }

    /// The original vertex a rewritten vertex stands for.
    pub fn owner_of(&self, vertex: usize) -> usize {
        self.owner[vertex]
    }
}
