#![forbid(unsafe_code)]

//! Headless 3D lattice graph layout.
//!
//! `narwhal` assigns every node of a connection graph an integer cell in a cubic lattice so that
//! directly connected nodes cluster and unrelated nodes spread apart, then centers the result
//! around the origin. It consumes an in-memory node arena and writes positions back onto it; how
//! the graph is built and how positions are rendered is left to the caller.

pub mod algo;
pub mod error;
pub mod graph;
mod rng;

pub use algo::grid3d::{GridLayout, LayoutOutcome, RoundStats};
pub use algo::{GridLayoutOptions, WeightTable};
pub use error::{Error, Result};
pub use graph::{Connection, Graph, GridPos, Node};

/// Headless layout entry point.
pub fn layout(graph: &mut Graph, opts: &GridLayoutOptions) -> Result<LayoutOutcome> {
    algo::grid3d::layout(graph, opts)
}
