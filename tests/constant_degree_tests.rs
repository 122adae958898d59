use bmssp::graph::{Graph, MutableGraph};
use bmssp::{compute_sssp, ConstantDegree, Dijkstra, DirectedGraph, ShortestPathAlgorithm, Weight};
use ordered_float::OrderedFloat;

fn graph_from_edges(vertices: usize, edges: &[(usize, usize, f64)]) -> DirectedGraph<Weight> {
    let mut graph = DirectedGraph::with_capacity(vertices);
    for &(u, v, w) in edges {
        assert!(graph.add_edge(u, v, OrderedFloat(w)));
    }
    graph
}

fn weight(graph: &DirectedGraph<Weight>, from: usize, to: usize) -> f64 {
    graph.get_edge_weight(from, to).expect("edge missing").0
}

#[test]
fn out_star_expands_into_a_send_cycle() {
    let graph = graph_from_edges(5, &[(0, 1, 10.0), (0, 2, 10.0), (0, 3, 10.0), (0, 4, 10.0)]);
    let (reduced, mapping) = ConstantDegree::transform(&graph);

    assert_eq!(mapping.transformed_count(), 8);
    assert_eq!(reduced.vertex_count(), 8);

    // Zero-weight cycle through the send nodes, starting at the original id.
    assert_eq!(weight(&reduced, 0, 5), 0.0);
    assert_eq!(weight(&reduced, 5, 6), 0.0);
    assert_eq!(weight(&reduced, 6, 7), 0.0);
    assert_eq!(weight(&reduced, 7, 0), 0.0);

    // One outgoing edge routed per send node, in adjacency order.
    assert_eq!(weight(&reduced, 0, 1), 10.0);
    assert_eq!(weight(&reduced, 5, 2), 10.0);
    assert_eq!(weight(&reduced, 6, 3), 10.0);
    assert_eq!(weight(&reduced, 7, 4), 10.0);

    for node in 5..8 {
        assert_eq!(mapping.owner_of(node), 0);
    }
    assert_eq!(mapping.owner_of(3), 3);
}

#[test]
fn in_star_expands_into_a_receive_cycle() {
    let graph = graph_from_edges(5, &[(1, 0, 10.0), (2, 0, 10.0), (3, 0, 10.0), (4, 0, 10.0)]);
    let (reduced, mapping) = ConstantDegree::transform(&graph);

    assert_eq!(mapping.transformed_count(), 8);
    assert_eq!(weight(&reduced, 0, 5), 0.0);
    assert_eq!(weight(&reduced, 7, 0), 0.0);

    // Each incoming edge lands on its own receive node.
    assert_eq!(weight(&reduced, 1, 0), 10.0);
    assert_eq!(weight(&reduced, 2, 5), 10.0);
    assert_eq!(weight(&reduced, 3, 6), 10.0);
    assert_eq!(weight(&reduced, 4, 7), 10.0);
}

#[test]
fn mixed_degrees_expand_send_nodes_before_receive_nodes() {
    let graph = graph_from_edges(
        8,
        &[
            (0, 1, 10.0),
            (0, 2, 10.0),
            (0, 3, 10.0),
            (0, 4, 10.0),
            (1, 5, 10.0),
            (1, 6, 10.0),
            (1, 7, 10.0),
            (2, 1, 10.0),
            (3, 1, 10.0),
            (4, 0, 10.0),
        ],
    );
    let (reduced, mapping) = ConstantDegree::transform(&graph);

    // Vertex 0 grows 4 send + 1 receive nodes, vertex 1 grows 3 + 3.
    assert_eq!(mapping.transformed_count(), 17);

    // Cycle of vertex 0: [0, 8, 9, 10, 11].
    assert_eq!(weight(&reduced, 0, 8), 0.0);
    assert_eq!(weight(&reduced, 8, 9), 0.0);
    assert_eq!(weight(&reduced, 11, 0), 0.0);
    // Cycle of vertex 1: [1, 12, 13, 14, 15, 16].
    assert_eq!(weight(&reduced, 16, 1), 0.0);

    // The edge 0 -> 1 leaves the first send node of 0 and enters the first
    // receive node of 1; later in-edges of 1 take the later receive nodes.
    assert_eq!(weight(&reduced, 0, 14), 10.0);
    assert_eq!(weight(&reduced, 2, 15), 10.0);
    assert_eq!(weight(&reduced, 3, 16), 10.0);
    assert_eq!(weight(&reduced, 10, 4), 10.0);
    assert_eq!(weight(&reduced, 4, 11), 10.0);

    for node in 12..17 {
        assert_eq!(mapping.owner_of(node), 1);
    }
}

#[test]
fn bounded_degree_graphs_pass_through_unchanged() {
    let graph = graph_from_edges(
        4,
        &[
            (0, 1, 10.0),
            (0, 2, 10.0),
            (3, 0, 10.0),
            (1, 3, 10.0),
            (1, 2, 10.0),
        ],
    );
    let (reduced, mapping) = ConstantDegree::transform(&graph);

    assert_eq!(mapping.transformed_count(), 4);
    assert_eq!(reduced.vertex_count(), 4);
    assert_eq!(reduced.edge_count(), 5);
    assert_eq!(weight(&reduced, 0, 1), 10.0);
    assert_eq!(weight(&reduced, 1, 3), 10.0);
}

#[test]
fn rewritten_graphs_respect_the_degree_limit() {
    let graph = graph_from_edges(
        8,
        &[
            (0, 1, 10.0),
            (0, 2, 10.0),
            (0, 3, 10.0),
            (0, 4, 10.0),
            (1, 5, 10.0),
            (1, 6, 10.0),
            (1, 7, 10.0),
            (2, 1, 10.0),
            (3, 1, 10.0),
            (4, 0, 10.0),
        ],
    );
    let (reduced, _) = ConstantDegree::transform(&graph);

    for v in 0..reduced.vertex_count() {
        assert!(reduced.out_degree(v) <= 2, "out-degree of {v} exceeds 2");
        assert!(reduced.in_degree(v) <= 2, "in-degree of {v} exceeds 2");
    }
}

#[test]
fn expansion_preserves_distances_from_the_source() {
    let graph = graph_from_edges(5, &[(0, 1, 10.0), (0, 2, 10.0), (0, 3, 10.0), (0, 4, 10.0)]);
    let (reduced, _) = ConstantDegree::transform(&graph);

    // Distances on the rewritten graph, read at the original ids.
    let oracle = Dijkstra::new()
        .compute_shortest_paths(&reduced, 0)
        .unwrap();
    for leaf in 1..5 {
        assert_eq!(oracle.distances[leaf], OrderedFloat(10.0));
    }

    let (distances, parents) = compute_sssp(&graph, 0).unwrap();
    assert_eq!(
        distances,
        vec![
            OrderedFloat(0.0),
            OrderedFloat(10.0),
            OrderedFloat(10.0),
            OrderedFloat(10.0),
            OrderedFloat(10.0),
        ]
    );
    for leaf in 1..5 {
        assert_eq!(parents[leaf], 0);
    }
}
