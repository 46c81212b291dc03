//! Upper-triangular pair tables: static weights and live costs.

use super::distance::hop_distance;
use crate::algo::WeightTable;
use crate::graph::{Graph, GridPos};

/// Dense upper-triangular storage for unordered pairs `(i, j)`, `i < j`.
///
/// Row `i` holds the `n - i - 1` entries `(i, i + 1) ..= (i, n - 1)`, stored back to back.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangularMatrix {
    n: usize,
    values: Vec<f64>,
}

impl TriangularMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n.saturating_sub(1) / 2],
        }
    }

    /// Number of nodes (not entries).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    fn idx(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        debug_assert!(i != j && j < self.n, "pair ({i}, {j}) out of range");
        i * (2 * self.n - i - 1) / 2 + (j - i - 1)
    }

    /// Entry for the unordered pair `{i, j}`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[self.idx(i, j)]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.idx(i, j);
        self.values[idx] = value;
    }

    /// Entries touching `node`, ordered by the other node's index.
    pub fn row(&self, node: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.n)
            .filter(move |&other| other != node)
            .map(move |other| self.get(node, other))
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Signed affinity per pair, built once from topology.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix(TriangularMatrix);

impl WeightMatrix {
    /// Weight for each `(i, j)`, `i < j`, from the hop distance `i -> j`.
    ///
    /// Only the lower-index to higher-index direction is searched. Callers sort nodes by
    /// descending connection count first, so the better-connected node is the search origin.
    pub fn build(graph: &Graph, max_hops: u32, table: &WeightTable) -> Self {
        let n = graph.len();
        let mut m = TriangularMatrix::new(n);
        for i in 0..n {
            for j in i + 1..n {
                m.set(i, j, table.weight_for(hop_distance(graph, i, j, max_hops)));
            }
        }
        Self(m)
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0.get(i, j)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `weight / d^2` with `d` the Manhattan distance between the two cells.
///
/// Distinct occupied cells are at least one step apart, so `d >= 1` under the lattice occupancy
/// invariant.
pub fn pair_cost(a: GridPos, b: GridPos, weight: f64) -> f64 {
    let d = f64::from(a.manhattan(b));
    weight / (d * d)
}

/// Current pair costs, kept in sync with node positions.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix(TriangularMatrix);

impl CostMatrix {
    pub fn build(weights: &WeightMatrix, positions: &[GridPos]) -> Self {
        let n = positions.len();
        let mut m = TriangularMatrix::new(n);
        for i in 0..n {
            for j in i + 1..n {
                m.set(i, j, pair_cost(positions[i], positions[j], weights.get(i, j)));
            }
        }
        Self(m)
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0.get(i, j)
    }

    /// Sum of all entries touching `node`.
    pub fn total_cost(&self, node: usize) -> f64 {
        self.0.row(node).sum()
    }

    /// Sum over unordered pairs.
    pub fn global_cost(&self) -> f64 {
        self.0.sum()
    }

    /// Overwrites every entry touching `node`. `costs` is ordered by the other node's index, as
    /// returned by [`node_costs`].
    pub fn update_costs(&mut self, node: usize, costs: &[f64]) {
        debug_assert_eq!(costs.len() + 1, self.0.len());
        let others = (0..self.0.len()).filter(|&other| other != node);
        for (other, &cost) in others.zip(costs) {
            self.0.set(node, other, cost);
        }
    }
}

/// Costs of `node` placed at `at` against every other node's current position, ordered by the
/// other node's index. Writes into `out` to avoid an allocation per scanned cell.
pub fn node_costs(
    node: usize,
    at: GridPos,
    positions: &[GridPos],
    weights: &WeightMatrix,
    out: &mut Vec<f64>,
) {
    out.clear();
    out.extend(
        positions
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != node)
            .map(|(other, &pos)| pair_cost(at, pos, weights.get(node, other))),
    );
}
