use crate::graph::traits::{Graph, MutableGraph};
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// A directed graph implementation using adjacency lists over dense ids.
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Outgoing edges for each vertex: `outgoing[u] = [(v, weight)]`
    outgoing: Vec<Vec<(usize, W)>>,

    /// Incoming edges for each vertex: `incoming[v] = [(u, weight)]`
    incoming: Vec<Vec<(usize, W)>>,
}

impl<W> DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Creates a new directed graph with the specified number of vertices
    pub fn with_capacity(vertices: usize) -> Self {
        DirectedGraph {
            outgoing: vec![Vec::new(); vertices],
            incoming: vec![Vec::new(); vertices],
        }
    }

    /// Validate that the graph doesn't have negative weights
    pub fn validate_non_negative(&self) -> bool {
        self.outgoing
            .iter()
            .all(|edges| edges.iter().all(|&(_, weight)| weight >= W::zero()))
    }

    pub fn out_degree(&self, vertex: usize) -> usize {
        self.outgoing.get(vertex).map_or(0, Vec::len)
    }

    pub fn in_degree(&self, vertex: usize) -> usize {
        self.incoming.get(vertex).map_or(0, Vec::len)
    }
}

impl<W> Default for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.outgoing.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn incoming_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.incoming.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.outgoing.len()
    }

    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.outgoing
            .get(from)
            .map_or(false, |edges| edges.iter().any(|&(target, _)| target == to))
    }

    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.outgoing.get(from).and_then(|edges| {
            edges
                .iter()
                .find(|&&(target, _)| target == to)
                .map(|&(_, weight)| weight)
        })
    }
}

impl<W> MutableGraph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn add_vertex(&mut self) -> usize {
        let new_id = self.outgoing.len();
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        new_id
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool {
        if !self.has_vertex(from) || !self.has_vertex(to) || weight < W::zero() {
            return false;
        }

        // An edge that already exists is updated in place.
        for edge in &mut self.outgoing[from] {
            if edge.0 == to {
                edge.1 = weight;
                for incoming in &mut self.incoming[to] {
                    if incoming.0 == from {
                        incoming.1 = weight;
                    }
                }
                return true;
            }
        }

        self.outgoing[from].push((to, weight));
        self.incoming[to].push((from, weight));
        true
    }
}
