//! Dense 3D universe with the full 26-cell Moore neighborhood.
//!
//! Stepping separates the interior (all 26 neighbors in range, counted through
//! precomputed flat-index offsets) from the boundary shell (per-axis bounds checks).
//! Both paths give identical counts; the split only saves bounds checks.
//!
//! `step_parallel` cuts the Z axis into contiguous slabs, one rayon task per slab.
//! Every task reads the current buffer and writes only its own slab of the next
//! buffer, so no locking is needed. The buffers are swapped after all tasks join.

use super::{CellState, Coord, Dimension, SharedRule, Universe};
use std::mem;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Number of cells in a 3D Moore neighborhood
pub const MOORE_3D: usize = 26;

#[derive(Clone)]
pub struct Universe3D {
    width: usize,
    height: usize,
    depth: usize,
    /// Flat array: `z * height * width + y * width + x`
    cells: Vec<CellState>,
    next: Vec<CellState>,
    rule: SharedRule,
    /// Signed flat-index deltas to the 26 neighbors
    neighbor_offsets: [isize; MOORE_3D],
}

impl Universe3D {
    /// Create a new universe with all cells dead
    pub fn new(width: usize, height: usize, depth: usize, rule: SharedRule) -> Self {
        let size = width * height * depth;
        Self {
            width,
            height,
            depth,
            cells: vec![CellState::DEAD; size],
            next: vec![CellState::DEAD; size],
            rule,
            neighbor_offsets: Self::compute_neighbor_offsets(width, height),
        }
    }

    fn compute_neighbor_offsets(width: usize, height: usize) -> [isize; MOORE_3D] {
        let (w, plane) = (width as isize, (width * height) as isize);
        let mut offsets = [0isize; MOORE_3D];
        let mut i = 0;

        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    offsets[i] = dz * plane + dy * w + dx;
                    i += 1;
                }
            }
        }

        offsets
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Current generation as a flat array
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    #[inline]
    const fn plane(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    const fn get_index(&self, x: usize, y: usize, z: usize) -> usize {
        z * self.plane() + y * self.width + x
    }

    fn index_of(&self, coord: Coord) -> Option<usize> {
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        let z = usize::try_from(coord.z).ok()?;
        (x < self.width && y < self.height && z < self.depth).then(|| self.get_index(x, y, z))
    }

    /// Boundary-safe count with explicit checks on each axis
    pub(crate) fn count_neighbors(&self, x: usize, y: usize, z: usize) -> usize {
        let (x, y, z) = (x as isize, y as isize, z as isize);
        let (w, h, d) = (self.width as isize, self.height as isize, self.depth as isize);
        let mut count = 0;

        for dz in -1..=1 {
            let nz = z + dz;
            if nz < 0 || nz >= d {
                continue;
            }
            for dy in -1..=1 {
                let ny = y + dy;
                if ny < 0 || ny >= h {
                    continue;
                }
                for dx in -1..=1 {
                    let nx = x + dx;
                    if (dx == 0 && dy == 0 && dz == 0) || nx < 0 || nx >= w {
                        continue;
                    }
                    let idx = self.get_index(nx as usize, ny as usize, nz as usize);
                    if self.cells[idx].is_alive() {
                        count += 1;
                    }
                }
            }
        }

        count
    }

    /// Interior count through the precomputed offsets.
    /// Only valid when every coordinate of `idx` lies in `1..dim-1`.
    #[inline]
    pub(crate) fn count_neighbors_interior(&self, idx: usize) -> usize {
        self.neighbor_offsets
            .iter()
            .filter(|&&offset| self.cells[idx.wrapping_add_signed(offset)].is_alive())
            .count()
    }

    #[inline]
    fn next_state(&self, current: CellState, neighbors: usize) -> CellState {
        let alive = if current.is_alive() {
            self.rule.should_survive(neighbors, current)
        } else {
            self.rule.should_birth(neighbors)
        };
        CellState::from(alive)
    }

    /// Compute the next generation for the Z layers in `z_range`.
    /// `out` covers exactly those layers, starting at layer `z_range.start`.
    fn compute_slab(&self, z_range: Range<usize>, out: &mut [CellState]) {
        let base = z_range.start * self.plane();
        let (w, h, d) = (self.width, self.height, self.depth);

        for z in z_range {
            let z_interior = z > 0 && z + 1 < d;

            for y in 0..h {
                let row_interior = z_interior && y > 0 && y + 1 < h && w > 2;
                let row = self.get_index(0, y, z);

                if row_interior {
                    // Boundary cells at both ends of the row, offsets in between
                    for x in [0, w - 1] {
                        let idx = row + x;
                        out[idx - base] = self.next_state(self.cells[idx], self.count_neighbors(x, y, z));
                    }
                    for idx in row + 1..row + w - 1 {
                        out[idx - base] = self.next_state(self.cells[idx], self.count_neighbors_interior(idx));
                    }
                } else {
                    for x in 0..w {
                        let idx = row + x;
                        out[idx - base] = self.next_state(self.cells[idx], self.count_neighbors(x, y, z));
                    }
                }
            }
        }
    }

    fn swap_in(&mut self, next: Vec<CellState>) {
        self.next = mem::replace(&mut self.cells, next);
    }

    /// Parallel step using one worker per available core (at most one per Z layer)
    pub fn step_parallel(&mut self) {
        let workers = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
        self.step_parallel_with(workers);
    }

    /// Parallel step with an explicit worker count, clamped to `1..=depth`.
    /// Produces exactly the same cells as [`Universe::step`].
    pub fn step_parallel_with(&mut self, workers: usize) {
        if self.cells.is_empty() {
            return;
        }

        let workers = workers.clamp(1, self.depth);
        let slab = self.depth / workers;
        let plane = self.plane();
        tracing::trace!(workers, depth = self.depth, "parallel 3d step");

        let mut next = mem::take(&mut self.next);
        next.resize(self.cells.len(), CellState::DEAD);

        let this = &*self;
        let mut rest: &mut [CellState] = &mut next;
        rayon::scope(|scope| {
            for worker in 0..workers {
                let z_start = worker * slab;
                // Last worker takes the remainder
                let z_end = if worker + 1 == workers { this.depth } else { z_start + slab };

                let (chunk, tail) = mem::take(&mut rest).split_at_mut((z_end - z_start) * plane);
                rest = tail;
                scope.spawn(move |_| this.compute_slab(z_start..z_end, chunk));
            }
        });

        self.swap_in(next);
    }

    /// Snapshot of one Z layer as rows, for visualization
    pub fn get_slice(&self, z: usize) -> Option<Vec<Vec<CellState>>> {
        if z >= self.depth {
            return None;
        }
        let start = z * self.plane();
        let layer = &self.cells[start..start + self.plane()];
        Some(layer.chunks(self.width.max(1)).map(<[CellState]>::to_vec).collect())
    }

    /// Randomize using the given generator
    pub fn randomize_with<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = CellState::from(rng.random_bool(0.5));
        }
    }
}

impl Universe for Universe3D {
    fn dimension(&self) -> Dimension {
        Dimension::ThreeD
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

    fn step(&mut self) {
        let mut next = mem::take(&mut self.next);
        next.resize(self.cells.len(), CellState::DEAD);
        self.compute_slab(0..self.depth, &mut next);
        self.swap_in(next);
    }

    fn size(&self) -> Coord {
        Coord::new_3d(self.width as i32, self.height as i32, self.depth as i32)
    }

    fn clone_box(&self) -> Box<dyn Universe> {
        Box::new(self.clone())
    }

    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = CellState::DEAD);
    }

    fn count_living(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    fn randomize(&mut self) {
        let mut rng = rand::rng();
        self.randomize_with(&mut rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConwayRule, Life3DRule, Rule};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn life3d(w: usize, h: usize, d: usize) -> Universe3D {
        Universe3D::new(w, h, d, Arc::new(Life3DRule))
    }

    fn fill(u: &mut Universe3D) {
        for z in 0..u.depth() as i32 {
            for y in 0..u.height() as i32 {
                for x in 0..u.width() as i32 {
                    u.set(Coord::new_3d(x, y, z), CellState::ALIVE);
                }
            }
        }
    }

    /// Survival depends on the energy a cell carries, not only on alive/dead
    struct EnergyGateRule;

    impl Rule for EnergyGateRule {
        fn name(&self) -> &'static str {
            "energy gate"
        }

        fn should_birth(&self, neighbors: usize) -> bool {
            (4..=9).contains(&neighbors)
        }

        fn should_survive(&self, neighbors: usize, current: CellState) -> bool {
            current.energy() > 100 && neighbors >= 3 + usize::from(current.energy() % 4)
        }
    }

    /// Reference generation computed with the bounds-checked counter only
    fn reference_step(u: &Universe3D) -> Vec<CellState> {
        let mut out = vec![CellState::DEAD; u.cells().len()];
        for z in 0..u.depth() {
            for y in 0..u.height() {
                for x in 0..u.width() {
                    let idx = u.get_index(x, y, z);
                    out[idx] = u.next_state(u.cells()[idx], u.count_neighbors(x, y, z));
                }
            }
        }
        out
    }

    fn random_energy(u: &mut Universe3D, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for cell in &mut u.cells {
            *cell = if rng.random_bool(0.4) { CellState(rng.random_range(1..=255)) } else { CellState::DEAD };
        }
    }

    #[test]
    fn test_offsets_cover_moore_neighborhood() {
        let u = life3d(5, 4, 3);
        let unique: HashSet<_> = u.neighbor_offsets.iter().collect();
        assert_eq!(unique.len(), MOORE_3D);
        assert!(!u.neighbor_offsets.contains(&0));
        assert!(u.neighbor_offsets.contains(&(20 + 5 + 1)));
        assert!(u.neighbor_offsets.contains(&-(20 + 5 + 1)));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut u = life3d(4, 4, 4);
        u.set(Coord::new_3d(4, 0, 0), CellState::ALIVE);
        u.set(Coord::new_3d(0, -1, 0), CellState::ALIVE);
        u.set(Coord::new_3d(0, 0, 4), CellState::ALIVE);
        assert_eq!(u.count_living(), 0);
        assert_eq!(u.get(Coord::new_3d(-1, -1, -1)), CellState::DEAD);
        assert_eq!(u.size(), Coord::new_3d(4, 4, 4));
        assert_eq!(u.dimension(), Dimension::ThreeD);
    }

    #[test]
    fn test_boundary_neighbor_counts() {
        let mut u = life3d(5, 5, 5);
        fill(&mut u);

        // Corner sees a 2x2x2 cube minus itself
        assert_eq!(u.count_neighbors(0, 0, 0), 7);
        assert_eq!(u.count_neighbors(4, 4, 4), 7);
        // Edge and face cells
        assert_eq!(u.count_neighbors(2, 0, 0), 11);
        assert_eq!(u.count_neighbors(2, 2, 0), 17);
        // Interior
        assert_eq!(u.count_neighbors(2, 2, 2), 26);
        assert_eq!(u.count_neighbors_interior(u.get_index(2, 2, 2)), 26);
    }

    #[test]
    fn test_interior_counter_matches_boundary_counter() {
        let mut u = Universe3D::new(7, 6, 5, Arc::new(EnergyGateRule));
        random_energy(&mut u, 11);

        for z in 1..4 {
            for y in 1..5 {
                for x in 1..6 {
                    assert_eq!(
                        u.count_neighbors_interior(u.get_index(x, y, z)),
                        u.count_neighbors(x, y, z),
                        "Mismatch at ({}, {}, {})", x, y, z
                    );
                }
            }
        }
    }

    #[test]
    fn test_step_matches_reference_with_energy_states() {
        for (w, h, d, seed) in [(7, 6, 5, 1), (3, 3, 3, 2), (10, 2, 4, 3), (1, 1, 1, 4), (9, 9, 9, 5)] {
            let mut u = Universe3D::new(w, h, d, Arc::new(EnergyGateRule));
            random_energy(&mut u, seed);

            let expected = reference_step(&u);
            u.step();
            assert_eq!(u.cells(), expected.as_slice(), "size {}x{}x{}", w, h, d);
        }
    }

    #[test]
    fn test_parallel_matches_sequential_for_every_worker_count() {
        for (w, h, d, seed) in [(6, 5, 7, 21), (8, 8, 8, 22), (3, 4, 1, 23), (12, 3, 10, 24)] {
            let mut base = life3d(w, h, d);
            let mut rng = StdRng::seed_from_u64(seed);
            base.randomize_with(&mut rng);

            let mut sequential = base.clone();
            sequential.step();
            sequential.step();

            for workers in 1..=d {
                let mut parallel = base.clone();
                parallel.step_parallel_with(workers);
                parallel.step_parallel_with(workers);
                assert_eq!(
                    parallel.cells(), sequential.cells(),
                    "size {}x{}x{} with {} workers", w, h, d, workers
                );
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential_with_energy_rule() {
        let mut base = Universe3D::new(9, 7, 6, Arc::new(EnergyGateRule));
        random_energy(&mut base, 99);

        let mut sequential = base.clone();
        sequential.step();

        let mut parallel = base.clone();
        parallel.step_parallel();
        assert_eq!(parallel.cells(), sequential.cells());

        // Worker counts above depth are clamped
        let mut oversubscribed = base.clone();
        oversubscribed.step_parallel_with(64);
        assert_eq!(oversubscribed.cells(), sequential.cells());

        let mut zero = base.clone();
        zero.step_parallel_with(0);
        assert_eq!(zero.cells(), sequential.cells());
    }

    #[test]
    fn test_parallel_on_empty_universe() {
        let mut u = life3d(0, 5, 5);
        u.step_parallel();
        u.step();
        assert_eq!(u.count_living(), 0);
    }

    #[test]
    fn test_block_is_stable_under_life3d() {
        let mut u = life3d(8, 8, 8);
        for z in 3..5 {
            for y in 3..5 {
                for x in 3..5 {
                    u.set(Coord::new_3d(x, y, z), CellState::ALIVE);
                }
            }
        }
        assert_eq!(u.count_neighbors(3, 3, 3), 7);

        for _ in 0..10 {
            u.step();
            assert_eq!(u.count_living(), 8);
        }
        for _ in 0..10 {
            u.step_parallel();
            assert_eq!(u.count_living(), 8);
        }
    }

    #[test]
    fn test_block_in_corner_is_stable() {
        let mut u = life3d(4, 4, 4);
        for z in 0..2 {
            for y in 0..2 {
                for x in 0..2 {
                    u.set(Coord::new_3d(x, y, z), CellState::ALIVE);
                }
            }
        }
        for _ in 0..10 {
            u.step();
        }
        assert_eq!(u.count_living(), 8);
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut u = Universe3D::new(5, 5, 5, Arc::new(ConwayRule));
        u.set(Coord::new_3d(2, 2, 2), CellState::ALIVE);
        u.step();
        assert_eq!(u.count_living(), 0);
    }

    #[test]
    fn test_get_slice() {
        let mut u = life3d(3, 2, 4);
        u.set(Coord::new_3d(2, 1, 3), CellState::ALIVE);
        u.set(Coord::new_3d(0, 0, 1), CellState(9));

        let slice = u.get_slice(3).expect("layer 3 exists");
        assert_eq!(slice.len(), 2);
        assert_eq!(slice[0].len(), 3);
        assert_eq!(slice[1][2], CellState::ALIVE);
        assert_eq!(u.get_slice(1).expect("layer 1 exists")[0][0], CellState(9));

        assert!(u.get_slice(4).is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut u = life3d(4, 4, 4);
        u.set(Coord::new_3d(1, 1, 1), CellState::ALIVE);

        let mut copy = u.clone_box();
        copy.clear();
        copy.set(Coord::new_3d(2, 2, 2), CellState::ALIVE);

        assert!(u.get(Coord::new_3d(1, 1, 1)).is_alive());
        assert!(!u.get(Coord::new_3d(2, 2, 2)).is_alive());
        assert_eq!(copy.count_living(), 1);
    }
}
