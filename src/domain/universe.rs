//! The contract shared by every universe variant.
//!
//! Pattern loaders only need `set`/`size`, renderers only `get`/`size`/`count_living`.

use super::{CellState, Coord, Dimension};

pub trait Universe: Send + Sync {
    /// Dimensionality of this universe
    fn dimension(&self) -> Dimension;

    /// State at `coord`. Out-of-range coordinates are dead.
    fn get(&self, coord: Coord) -> CellState;

    /// Set the state at `coord`. Out-of-range coordinates are ignored.
    fn set(&mut self, coord: Coord, state: CellState);

    /// Advance one generation
    fn step(&mut self);

    /// Extent along each used axis
    fn size(&self) -> Coord;

    /// Independent deep copy
    fn clone_box(&self) -> Box<dyn Universe>;

    /// Reset every cell to dead
    fn clear(&mut self);

    /// Number of non-dead cells
    fn count_living(&self) -> usize;

    /// Fill with an unbiased coin flip per cell
    fn randomize(&mut self);
}

impl Clone for Box<dyn Universe> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
