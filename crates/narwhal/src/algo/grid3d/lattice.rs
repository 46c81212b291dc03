//! Cubic occupancy lattice: one node per cell.

use crate::error::{Error, Result};
use crate::graph::GridPos;
use crate::rng::XorShift64Star;

/// Cell access and mutation stay inside the crate; callers only get bounds-checked queries and the
/// occupied/free iterators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
    // Flat grid: cells[(x * size + y) * size + z].
    cells: Vec<Option<usize>>,
}

impl Lattice {
    /// Side length for `n` nodes: `oversize * ceil(cbrt(n))`, with the cube root taken exactly
    /// over integers.
    pub fn side_for(n: usize, oversize: usize) -> usize {
        let mut root = 0usize;
        while root.pow(3) < n {
            root += 1;
        }
        root * oversize
    }

    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, pos: GridPos) -> usize {
        debug_assert!(self.contains(pos), "{pos:?} outside lattice of size {}", self.size);
        ((pos.x as usize) * self.size + pos.y as usize) * self.size + pos.z as usize
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        let s = self.size as i32;
        (0..s).contains(&pos.x) && (0..s).contains(&pos.y) && (0..s).contains(&pos.z)
    }

    pub(crate) fn get(&self, pos: GridPos) -> Option<usize> {
        self.cells[self.idx(pos)]
    }

    pub(crate) fn is_free(&self, pos: GridPos) -> bool {
        self.get(pos).is_none()
    }

    pub(crate) fn occupy(&mut self, pos: GridPos, node: usize) {
        let idx = self.idx(pos);
        debug_assert!(self.cells[idx].is_none(), "{pos:?} already occupied");
        self.cells[idx] = Some(node);
    }

    pub(crate) fn vacate(&mut self, pos: GridPos) {
        let idx = self.idx(pos);
        self.cells[idx] = None;
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Occupied cells as `(pos, node)`, in scan order.
    pub fn occupied(&self) -> impl Iterator<Item = (GridPos, usize)> + '_ {
        self.cells_in_scan_order()
            .filter_map(move |pos| self.get(pos).map(|node| (pos, node)))
    }

    /// Free cells in scan order: `x` outermost, then `y`, then `z`.
    pub fn free_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.cells_in_scan_order().filter(move |&pos| self.is_free(pos))
    }

    fn cells_in_scan_order(&self) -> impl Iterator<Item = GridPos> + '_ {
        let s = self.size as i32;
        (0..s).flat_map(move |x| {
            (0..s).flat_map(move |y| (0..s).map(move |z| GridPos::new(x, y, z)))
        })
    }

    /// Draws uniformly random cells until a free one turns up, then occupies it.
    ///
    /// Fails with `Error::Capacity` after `max_attempts` draws instead of spinning on a full
    /// lattice.
    pub(crate) fn random_place(
        &mut self,
        node: usize,
        rng: &mut XorShift64Star,
        max_attempts: usize,
    ) -> Result<GridPos> {
        for _ in 0..max_attempts {
            let x = rng.next_usize(self.size) as i32;
            let y = rng.next_usize(self.size) as i32;
            let z = rng.next_usize(self.size) as i32;
            let pos = GridPos::new(x, y, z);
            if self.is_free(pos) {
                self.occupy(pos, node);
                return Ok(pos);
            }
        }
        Err(Error::Capacity {
            node,
            attempts: max_attempts,
            grid_size: self.size,
        })
    }
}
