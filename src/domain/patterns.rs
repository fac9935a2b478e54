use super::{CellState, Coord, Universe};
use std::collections::BTreeMap;

/// Represents a pattern that can be placed on any universe.
/// Cells are stored sparsely, so every coordinate appears at most once.
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    /// Bounding box of the cells (unused axes are 0)
    pub size: Coord,
    pub cells: BTreeMap<Coord, CellState>,
}

impl Pattern {
    /// Create a pattern of fully alive cells
    pub fn new(name: &'static str, description: &'static str, cells: impl IntoIterator<Item = Coord>) -> Self {
        Self::with_states(name, description, cells.into_iter().map(|c| (c, CellState::ALIVE)))
    }

    /// Create a pattern with explicit per-cell states.
    /// Later entries for the same coordinate replace earlier ones.
    pub fn with_states(
        name: &'static str,
        description: &'static str,
        cells: impl IntoIterator<Item = (Coord, CellState)>,
    ) -> Self {
        let cells: BTreeMap<Coord, CellState> = cells.into_iter().collect();
        let extent = |axis: fn(&Coord) -> i32| cells.keys().map(axis).max().map_or(0, |m| m + 1);
        // Depth axes only count once a cell actually leaves the plane
        let depth_extent = |axis: fn(&Coord) -> i32| {
            if cells.keys().all(|c| axis(c) == 0) { 0 } else { extent(axis) }
        };
        let size = Coord::new_4d(
            extent(|c| c.x),
            extent(|c| c.y),
            depth_extent(|c| c.z),
            depth_extent(|c| c.w),
        );
        Self { name, description, size, cells }
    }

    /// Number of cells set by this pattern
    pub fn population(&self) -> usize {
        self.cells.values().filter(|s| s.is_alive()).count()
    }

    /// Write the pattern at `offset`. Cells falling outside the universe are dropped.
    pub fn place_on(&self, universe: &mut dyn Universe, offset: Coord) {
        for (&coord, &state) in &self.cells {
            universe.set(coord.offset(offset), state);
        }
    }

    /// Offset that centers the pattern in the universe (on every used axis)
    pub fn centered_offset(&self, universe: &dyn Universe) -> Coord {
        let size = universe.size();
        let center = |space: i32, extent: i32| ((space - extent) / 2).max(0);
        Coord::new_3d(
            center(size.x, self.size.x),
            center(size.y, self.size.y),
            center(size.z, self.size.z),
        )
    }
}

/// Classic patterns for each kind of universe
pub mod presets {
    use super::*;

    fn plane(cells: &[(i32, i32)]) -> Vec<Coord> {
        cells.iter().map(|&(x, y)| Coord::new_2d(x, y)).collect()
    }

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            "Moves diagonally (period 4)",
            plane(&[
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ]),
        )
    }

    /// Blinker - period 2 oscillator
    pub fn blinker() -> Pattern {
        Pattern::new(
            "Blinker",
            "Oscillator (period 2)",
            plane(&[(0, 1), (1, 1), (2, 1)]),
        )
    }

    /// Toad - period 2 oscillator
    pub fn toad() -> Pattern {
        Pattern::new(
            "Toad",
            "Oscillator (period 2)",
            plane(&[
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ]),
        )
    }

    /// Block - simple still life
    pub fn block() -> Pattern {
        Pattern::new(
            "Block",
            "Still life",
            plane(&[
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ]),
        )
    }

    /// 2x2x2 cube, the smallest still life under B6/S567
    pub fn block_3d() -> Pattern {
        let cells = (0..2).flat_map(|z| (0..2).flat_map(move |y| (0..2).map(move |x| Coord::new_3d(x, y, z))));
        Pattern::new("Block 3D", "Still life (B6/S567)", cells)
    }

    /// Two stacked 5-cell boats; every cell has 5 to 7 neighbors, so it never changes
    pub fn boat_3d() -> Pattern {
        let layer = [(1, 0), (2, 0), (0, 1), (2, 1), (1, 2)];
        let cells = (0..2).flat_map(move |z| layer.into_iter().map(move |(x, y)| Coord::new_3d(x, y, z)));
        Pattern::new("Boat 3D", "Still life, two stacked boats (B6/S567)", cells)
    }

    /// Blinkers on three consecutive layers, for watching layer interaction
    pub fn stacked_blinkers() -> Pattern {
        let cells = (0..3).flat_map(|z| (0..3).map(move |x| Coord::new_3d(x, 1, z)));
        Pattern::new("Stacked Blinkers", "Three aligned blinkers (2.5D)", cells)
    }

    /// Patterns meant for flat grids and layers
    pub fn patterns_2d() -> Vec<Pattern> {
        vec![glider(), blinker(), toad(), block()]
    }

    /// Patterns meant for volumes
    pub fn patterns_3d() -> Vec<Pattern> {
        vec![block_3d(), boat_3d()]
    }
}
