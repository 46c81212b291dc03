//! Discrete force-directed layout on a cubic lattice.
//!
//! Nodes sit on integer cells, one per cell. Each unordered pair carries a weight derived from hop
//! distance (negative for directly connected nodes, small positive values otherwise) and a cost
//! `weight / d^2`, where `d` is the Manhattan distance between the two cells. A fixed schedule of
//! rounds alternates random re-placement of a shrinking fraction of nodes with an exhaustive pass
//! that moves every node to its cheapest free cell.

use crate::algo::GridLayoutOptions;
use crate::error::Result;
use crate::graph::{Graph, GridPos};
use crate::rng::XorShift64Star;

pub mod distance;
pub mod lattice;
pub mod matrix;

pub use lattice::Lattice;
pub use matrix::{CostMatrix, TriangularMatrix, WeightMatrix};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome {
    /// `order[new] == old`: the stable descending-connection-count permutation applied to the
    /// graph's nodes.
    pub order: Vec<usize>,
    pub grid_size: usize,
    pub rounds: Vec<RoundStats>,
    /// Sum of pair costs over unordered pairs at the end of the schedule.
    pub total_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundStats {
    pub perturbation: f64,
    pub threshold: f64,
    /// Nodes randomly re-placed in the perturb phase.
    pub perturbed: usize,
    /// Nodes that changed cell in the exhaustive re-placement phase.
    pub moved: usize,
    pub total_cost: f64,
}

/// Lays out `graph` in place.
///
/// Nodes are first stably sorted by descending connection count (connection targets are remapped
/// accordingly), then every node's `position` is overwritten with its final centered cell.
/// On error `graph` is left untouched.
pub fn layout(graph: &mut Graph, opts: &GridLayoutOptions) -> Result<LayoutOutcome> {
    opts.validate()?;
    graph.validate()?;

    let mut sorted = graph.clone();
    let order = sorted.sort_by_connection_count();
    let n = sorted.len();
    let grid_size = Lattice::side_for(n, opts.grid_oversize);
    let shift = -((grid_size / 2) as i32);

    if n <= 1 {
        // No pairs, so no cost function to minimize.
        if let Some(node) = sorted.nodes.first_mut() {
            node.position = GridPos::default().offset(shift);
        }
        *graph = sorted;
        return Ok(LayoutOutcome {
            order,
            grid_size,
            rounds: Vec::new(),
            total_cost: 0.0,
        });
    }

    let _span = tracing::debug_span!("grid3d_layout", nodes = n, grid_size).entered();
    let mut sim = GridLayout::new(&sorted, opts)?;
    let rounds = sim.run()?;

    for (node, pos) in sorted.nodes.iter_mut().zip(sim.centered_positions()) {
        node.position = pos;
    }
    *graph = sorted;

    Ok(LayoutOutcome {
        order,
        grid_size,
        rounds,
        total_cost: sim.costs().global_cost(),
    })
}

/// Minimization state for one layout run.
///
/// Owns the lattice and both pair matrices. Positions are lattice coordinates in
/// `[0, grid_size)^3` until [`GridLayout::centered_positions`] translates them.
#[derive(Debug, Clone)]
pub struct GridLayout {
    opts: GridLayoutOptions,
    weights: WeightMatrix,
    lattice: Lattice,
    costs: CostMatrix,
    positions: Vec<GridPos>,
    rng: XorShift64Star,
    scratch: Vec<f64>,
    best: Vec<f64>,
}

impl GridLayout {
    /// Builds weights from the graph's topology and places every node at a random free cell.
    ///
    /// Nodes are processed in the order given; [`layout`] sorts them beforehand.
    pub fn new(graph: &Graph, opts: &GridLayoutOptions) -> Result<Self> {
        opts.validate()?;
        graph.validate()?;

        let n = graph.len();
        let weights = WeightMatrix::build(graph, opts.max_hops, &opts.weights);
        let mut lattice = Lattice::new(Lattice::side_for(n, opts.grid_oversize));
        let mut rng = XorShift64Star::new(opts.random_seed);

        let positions = (0..n)
            .map(|node| lattice.random_place(node, &mut rng, opts.max_placement_attempts))
            .collect::<Result<Vec<_>>>()?;
        let costs = CostMatrix::build(&weights, &positions);

        tracing::debug!(
            nodes = n,
            grid_size = lattice.size(),
            initial_cost = costs.global_cost(),
            "initialized lattice"
        );

        Ok(Self {
            opts: opts.clone(),
            weights,
            lattice,
            costs,
            positions,
            rng,
            scratch: Vec::with_capacity(n),
            best: Vec::with_capacity(n),
        })
    }

    pub fn grid_size(&self) -> usize {
        self.lattice.size()
    }

    pub fn positions(&self) -> &[GridPos] {
        &self.positions
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    /// Runs the full perturbation schedule.
    pub fn run(&mut self) -> Result<Vec<RoundStats>> {
        self.opts
            .perturbation_schedule()
            .into_iter()
            .map(|p| self.round(p))
            .collect()
    }

    /// One perturb phase followed by one exhaustive re-placement phase.
    pub fn round(&mut self, perturbation: f64) -> Result<RoundStats> {
        let (threshold, perturbed) = self.perturb(perturbation)?;
        let moved = self.minimize();
        let stats = RoundStats {
            perturbation,
            threshold,
            perturbed,
            moved,
            total_cost: self.costs.global_cost(),
        };
        tracing::debug!(
            perturbation,
            threshold,
            perturbed,
            moved,
            total_cost = stats.total_cost,
            "round complete"
        );
        Ok(stats)
    }

    /// Randomly re-places every node whose total cost is strictly below the value at index
    /// `floor(n * perturbation)` of the ascending total costs. This disrupts the lowest-cost band,
    /// not the highest.
    ///
    /// Returns `(threshold, perturbed)`.
    pub fn perturb(&mut self, perturbation: f64) -> Result<(f64, usize)> {
        let n = self.positions.len();
        if n == 0 {
            return Ok((0.0, 0));
        }
        let totals: Vec<f64> = (0..n).map(|i| self.costs.total_cost(i)).collect();
        let mut sorted = totals.clone();
        sorted.sort_by(f64::total_cmp);
        let cut = ((n as f64) * perturbation).floor() as usize;
        let threshold = sorted[cut.min(n - 1)];

        let mut perturbed = 0;
        for (node, &total) in totals.iter().enumerate() {
            if total >= threshold {
                continue;
            }
            let current = self.positions[node];
            self.lattice.vacate(current);
            let placed =
                self.lattice
                    .random_place(node, &mut self.rng, self.opts.max_placement_attempts);
            let pos = match placed {
                Ok(pos) => pos,
                Err(e) => {
                    // Keep the lattice and `positions` in agreement for the caller.
                    self.lattice.occupy(current, node);
                    return Err(e);
                }
            };
            self.commit(node, pos);
            perturbed += 1;
        }
        Ok((threshold, perturbed))
    }

    /// Moves each node, in index order, to the cheapest free cell.
    ///
    /// The node's current cell with its recorded cost is the incumbent; a candidate replaces it only
    /// when strictly cheaper, so among equal candidates the first in `x`, `y`, `z` scan order wins.
    /// Returns how many nodes changed cell.
    pub fn minimize(&mut self) -> usize {
        let mut moved = 0;
        for node in 0..self.positions.len() {
            let current = self.positions[node];
            self.lattice.vacate(current);

            let mut best_pos = current;
            let mut best_total = self.costs.total_cost(node);
            for pos in self.lattice.free_cells() {
                matrix::node_costs(
                    node,
                    pos,
                    &self.positions,
                    &self.weights,
                    &mut self.scratch,
                );
                let total: f64 = self.scratch.iter().sum();
                if total < best_total {
                    best_total = total;
                    best_pos = pos;
                    self.best.clone_from(&self.scratch);
                }
            }

            self.lattice.occupy(best_pos, node);
            self.positions[node] = best_pos;
            if best_pos != current {
                self.costs.update_costs(node, &self.best);
                moved += 1;
                tracing::trace!(node, from = ?current, to = ?best_pos, cost = best_total, "moved");
            }
        }
        moved
    }

    /// Positions translated by `-floor(grid_size / 2)` on every axis.
    pub fn centered_positions(&self) -> Vec<GridPos> {
        let shift = -((self.lattice.size() / 2) as i32);
        self.positions.iter().map(|p| p.offset(shift)).collect()
    }

    fn commit(&mut self, node: usize, pos: GridPos) {
        self.positions[node] = pos;
        matrix::node_costs(node, pos, &self.positions, &self.weights, &mut self.scratch);
        self.costs.update_costs(node, &self.scratch);
    }
}
