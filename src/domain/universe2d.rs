use super::{CellState, Coord, Dimension, SharedRule, Universe};
use std::mem;

/// Universe2D is a dense, fixed-size 2D grid.
/// Cells live in a flat row-major array (`y * width + x`) with a second buffer
/// of the same size for double buffering, plus a per-cell age map.
/// Everything outside the grid is permanently dead.
#[derive(Clone)]
pub struct Universe2D {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    next: Vec<CellState>,
    ages: Vec<u32>,
    rule: SharedRule,
}

impl Universe2D {
    /// Create a new universe with all cells dead
    pub fn new(width: usize, height: usize, rule: SharedRule) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            cells: vec![CellState::DEAD; size],
            next: vec![CellState::DEAD; size],
            ages: vec![0; size],
            rule,
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Current generation, row-major
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn index_of(&self, coord: Coord) -> Option<usize> {
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        (x < self.width && y < self.height).then(|| self.get_index(x, y))
    }

    /// Liveness at a signed position; anything off the grid is dead
    pub(crate) fn is_alive_at(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return false;
        }
        self.cells[self.get_index(x as usize, y as usize)].is_alive()
    }

    /// Raw state at an in-range position
    pub(crate) fn state_at(&self, x: usize, y: usize) -> CellState {
        self.cells[self.get_index(x, y)]
    }

    /// Count live Moore neighbors (8 cells), no wrapping
    pub(crate) fn count_neighbors(&self, x: usize, y: usize) -> usize {
        let (x, y) = (x as isize, y as isize);
        let mut count = 0;

        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.is_alive_at(x + dx, y + dy) {
                    count += 1;
                }
            }
        }

        count
    }

    /// Age of the cell in generations it has been continuously alive.
    /// 0 for dead or out-of-range cells.
    pub fn age(&self, x: usize, y: usize) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.ages[self.get_index(x, y)]
    }

    /// Randomize using the given generator
    pub fn randomize_with<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        for (cell, age) in self.cells.iter_mut().zip(self.ages.iter_mut()) {
            let alive = rng.random_bool(0.5);
            *cell = CellState::from(alive);
            *age = u32::from(alive);
        }
    }

    /// Install an already computed generation: rebuilds the age map against
    /// the current generation, then swaps the buffers.
    pub(crate) fn commit_generation(&mut self, next: Vec<CellState>) {
        debug_assert_eq!(next.len(), self.cells.len());

        self.ages = self
            .cells
            .iter()
            .zip(&next)
            .zip(&self.ages)
            .map(|((before, after), age)| match (before.is_alive(), after.is_alive()) {
                (false, true) => 1,
                (true, true) => age.saturating_add(1),
                _ => 0,
            })
            .collect();

        self.next = mem::replace(&mut self.cells, next);
    }
}

impl Universe for Universe2D {
    fn dimension(&self) -> Dimension {
        Dimension::TwoD
    }

    fn get(&self, coord: Coord) -> CellState {
        self.index_of(coord)
            .map_or(CellState::DEAD, |idx| self.cells[idx])
    }

    fn set(&mut self, coord: Coord, state: CellState) {
        if let Some(idx) = self.index_of(coord) {
            self.cells[idx] = state;
        }
    }

    /// Every cell reads only the settled previous generation; the next one is
    /// written into the back buffer and swapped in at the end.
    fn step(&mut self) {
        let mut next = mem::take(&mut self.next);
        next.resize(self.cells.len(), CellState::DEAD);

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.get_index(x, y);
                let neighbors = self.count_neighbors(x, y);
                let current = self.cells[idx];

                let alive = if current.is_alive() {
                    self.rule.should_survive(neighbors, current)
                } else {
                    self.rule.should_birth(neighbors)
                };
                next[idx] = CellState::from(alive);
            }
        }

        self.commit_generation(next);
    }

    fn size(&self) -> Coord {
        Coord::new_2d(self.width as i32, self.height as i32)
    }

    fn clone_box(&self) -> Box<dyn Universe> {
        Box::new(self.clone())
    }

    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = CellState::DEAD);
        self.ages.iter_mut().for_each(|age| *age = 0);
    }

    fn count_living(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    fn randomize(&mut self) {
        let mut rng = rand::rng();
        self.randomize_with(&mut rng);
    }
}
