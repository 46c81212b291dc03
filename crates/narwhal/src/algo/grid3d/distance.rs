//! Bounded-depth hop distance along directed connections.

use crate::graph::Graph;

/// Length of the shortest directed path `from -> to`, if it is at most `max_hops` long.
///
/// Plain depth-bounded recursion: no visited set and no memoization. Cycles terminate only because
/// `max_hops` shrinks by one per level, so callers must keep the bound small (the options cap it
/// at 16). The search visits at most `deg^max_hops` paths, which is fine for the graph sizes the
/// lattice layout can handle anyway.
pub fn hop_distance(graph: &Graph, from: usize, to: usize, max_hops: u32) -> Option<u32> {
    if max_hops == 0 {
        return None;
    }
    let connections = &graph.nodes[from].connections;
    if connections.iter().any(|c| c.target == to) {
        return Some(1);
    }
    if max_hops == 1 {
        return None;
    }
    connections
        .iter()
        .filter_map(|c| hop_distance(graph, c.target, to, max_hops - 1))
        .min()
        .map(|d| d + 1)
}
