use narwhal::algo::grid3d::WeightMatrix;
use narwhal::algo::grid3d::distance::hop_distance;
use narwhal::{Graph, WeightTable};

fn path(n: usize) -> Graph {
    let mut g = Graph::with_nodes(n);
    for i in 0..n - 1 {
        g.link(i, i + 1);
    }
    g
}

#[test]
fn weight_matrix_directly_connected_pair_attracts() {
    let mut g = Graph::with_nodes(2);
    g.connect(0, 1);
    let w = WeightMatrix::build(&g, 4, &WeightTable::default());
    assert_eq!(w.get(0, 1), -1.0);
}

#[test]
fn weight_matrix_five_node_path_uses_hop_table() {
    let g = path(5);
    let w = WeightMatrix::build(&g, 4, &WeightTable::default());
    assert_eq!(w.get(0, 1), -1.0);
    assert_eq!(w.get(0, 2), 0.0001);
    assert_eq!(w.get(0, 3), 0.001);
    assert_eq!(w.get(0, 4), 0.01);
    assert_eq!(w.get(1, 3), 0.0001);
    assert_eq!(w.get(3, 4), -1.0);
}

#[test]
fn weight_matrix_pairs_beyond_four_hops_get_default_repulsion() {
    let g = path(6);
    let w = WeightMatrix::build(&g, 4, &WeightTable::default());
    assert_eq!(hop_distance(&g, 0, 5, 4), None);
    assert_eq!(w.get(0, 5), 0.1);
    assert_eq!(w.get(0, 4), 0.01);
}

#[test]
fn weight_matrix_disconnected_components_repel() {
    let mut g = Graph::with_nodes(4);
    g.link(0, 1);
    g.link(2, 3);
    let w = WeightMatrix::build(&g, 4, &WeightTable::default());
    assert_eq!(w.get(0, 1), -1.0);
    assert_eq!(w.get(2, 3), -1.0);
    for (i, j) in [(0, 2), (0, 3), (1, 2), (1, 3)] {
        assert_eq!(w.get(i, j), 0.1, "pair ({i}, {j})");
    }
}

#[test]
fn weight_matrix_searches_from_lower_to_higher_index() {
    // Only 1 -> 0 exists; the pair (0, 1) is searched from 0 and finds nothing.
    let mut g = Graph::with_nodes(2);
    g.connect(1, 0);
    let w = WeightMatrix::build(&g, 4, &WeightTable::default());
    assert_eq!(w.get(0, 1), 0.1);
}

#[test]
fn weight_matrix_honors_custom_table() {
    let table = WeightTable {
        direct: -5.0,
        unreachable: 2.0,
        ..WeightTable::default()
    };
    let mut g = Graph::with_nodes(3);
    g.connect(0, 1);
    let w = WeightMatrix::build(&g, 4, &table);
    assert_eq!(w.get(0, 1), -5.0);
    assert_eq!(w.get(0, 2), 2.0);
    assert_eq!(w.get(1, 2), 2.0);
}
