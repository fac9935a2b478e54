//! Layered ("2.5D") universe: a stack of 2D layers sharing one rule.
//!
//! With interaction off every layer steps on its own. With interaction on, the
//! active [`LayerInteractionRule`] folds the layers directly above (z - 1) and
//! below (z + 1) into each cell's update. The whole stack is computed before any
//! layer is replaced.

use super::{
    CellState, Coord, Dimension, LayerInteractionRule, SharedInteraction, SharedRule, Universe,
    Universe2D, WeightedNeighborsRule,
};
use std::sync::Arc;

/// Vertical weight installed by default
pub const DEFAULT_VERTICAL_WEIGHT: f64 = 0.3;

#[derive(Clone)]
pub struct Universe25D {
    width: usize,
    height: usize,
    depth: usize,
    layers: Vec<Universe2D>,
    layer_interaction: bool,
    rule: SharedRule,
    interaction: SharedInteraction,
}

impl Universe25D {
    /// Create `depth` dead layers. Interaction starts disabled with a
    /// weighted-neighbors policy ready to use.
    pub fn new(width: usize, height: usize, depth: usize, rule: SharedRule) -> Self {
        let layers = (0..depth)
            .map(|_| Universe2D::new(width, height, Arc::clone(&rule)))
            .collect();
        let interaction = Arc::new(WeightedNeighborsRule::new(Arc::clone(&rule), DEFAULT_VERTICAL_WEIGHT));

        Self {
            width,
            height,
            depth,
            layers,
            layer_interaction: false,
            rule,
            interaction,
        }
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

    pub fn layer(&self, z: usize) -> Option<&Universe2D> {
        self.layers.get(z)
    }

    pub fn layer_mut(&mut self, z: usize) -> Option<&mut Universe2D> {
        self.layers.get_mut(z)
    }

    pub fn layer_interaction(&self) -> bool {
        self.layer_interaction
    }

    pub fn set_layer_interaction(&mut self, enabled: bool) {
        self.layer_interaction = enabled;
    }

    pub fn interaction_rule(&self) -> &dyn LayerInteractionRule {
        self.interaction.as_ref()
    }

    pub fn set_interaction_rule(&mut self, rule: SharedInteraction) {
        self.interaction = rule;
    }

    /// Shortcut for installing a weighted-neighbors policy.
    /// Weights outside [0, 1] are ignored.
    pub fn set_vertical_weight(&mut self, weight: f64) {
        if (0.0..=1.0).contains(&weight) {
            self.interaction = Arc::new(WeightedNeighborsRule::new(Arc::clone(&self.rule), weight));
        }
    }

    /// Living cells in layer `z`, 0 for a missing layer
    pub fn count_living_in_layer(&self, z: usize) -> usize {
        self.layers.get(z).map_or(0, Universe2D::count_living)
    }

    /// Randomize every layer using the given generator
    pub fn randomize_with<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        for layer in &mut self.layers {
            layer.randomize_with(rng);
        }
    }

    fn step_independent(&mut self) {
        for layer in &mut self.layers {
            layer.step();
        }
    }

    fn step_with_interaction(&mut self) {
        let next: Vec<Vec<CellState>> = (0..self.depth).map(|z| self.compute_layer(z)).collect();

        for (layer, cells) in self.layers.iter_mut().zip(next) {
            layer.commit_generation(cells);
        }
    }

    /// Next generation of layer `z` under the active interaction rule
    fn compute_layer(&self, z: usize) -> Vec<CellState> {
        let layer = &self.layers[z];
        let upper = z.checked_sub(1).map(|above| &self.layers[above]);
        let lower = self.layers.get(z + 1);
        let mut next = Vec::with_capacity(self.width * self.height);

        for y in 0..self.height {
            for x in 0..self.width {
                let horizontal = layer.count_neighbors(x, y);
                let vertical = count_vertical(upper, x, y) + count_vertical(lower, x, y);

                let current = layer.state_at(x, y);
                let upper_state = upper.map_or(CellState::DEAD, |l| l.state_at(x, y));
                let lower_state = lower.map_or(CellState::DEAD, |l| l.state_at(x, y));

                let neighbors = self.interaction.calculate_neighbor_count(
                    horizontal,
                    vertical,
                    current,
                    upper_state,
                    lower_state,
                );

                let alive = if current.is_alive() {
                    self.interaction.should_survive(neighbors, current, upper_state, lower_state)
                } else {
                    self.interaction.should_birth(neighbors, upper_state, lower_state)
                };
                next.push(CellState::from(alive));
            }
        }

        next
    }
}

/// Live cells in the 3x3 block centered on (x, y) of an adjacent layer
fn count_vertical(layer: Option<&Universe2D>, x: usize, y: usize) -> usize {
    let Some(layer) = layer else {
        return 0;
    };
    let (x, y) = (x as isize, y as isize);

    (-1..=1)
        .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| layer.is_alive_at(x + dx, y + dy))
        .count()
}

impl Universe for Universe25D {
    fn dimension(&self) -> Dimension {
        Dimension::TwoAndHalfD
    }

    fn get(&self, coord: Coord) -> CellState {
        usize::try_from(coord.z)
            .ok()
            .and_then(|z| self.layers.get(z))
            .map_or(CellState::DEAD, |layer| layer.get(Coord::new_2d(coord.x, coord.y)))
    }

    fn set(&mut self, coord: Coord, state: CellState) {
        if let Some(layer) = usize::try_from(coord.z).ok().and_then(|z| self.layers.get_mut(z)) {
            layer.set(Coord::new_2d(coord.x, coord.y), state);
        }
    }

    fn step(&mut self) {
        if self.layer_interaction {
            self.step_with_interaction();
        } else {
            self.step_independent();
        }
    }

    fn size(&self) -> Coord {
        Coord::new_3d(self.width as i32, self.height as i32, self.depth as i32)
    }

    fn clone_box(&self) -> Box<dyn Universe> {
        Box::new(self.clone())
    }

    fn clear(&mut self) {
        self.layers.iter_mut().for_each(Universe::clear);
    }

    fn count_living(&self) -> usize {
        self.layers.iter().map(Universe::count_living).sum()
    }

    fn randomize(&mut self) {
        let mut rng = rand::rng();
        self.randomize_with(&mut rng);
    }
}
