//! Cross-layer policies for the 2.5D universe.
//!
//! Each policy wraps a base [`Rule`]: it turns horizontal and vertical counts
//! into an effective neighbor count and may add layer conditions to birth.

use super::{CellState, SharedRule};
use std::fmt;
use std::sync::Arc;

/// Which interaction a policy implements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerInteractionKind {
    WeightedNeighbors,
    BirthBetweenLayers,
    EnergyDiffusion,
}

impl fmt::Display for LayerInteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayerInteractionKind::WeightedNeighbors => "Weighted",
            LayerInteractionKind::BirthBetweenLayers => "BirthBetween",
            LayerInteractionKind::EnergyDiffusion => "Energy",
        })
    }
}

/// Trait for cross-layer interaction policies
pub trait LayerInteractionRule: Send + Sync {
    fn kind(&self) -> LayerInteractionKind;

    /// Effective neighbor count from same-layer (0-8) and adjacent-layer (0-18) counts
    fn calculate_neighbor_count(
        &self,
        horizontal: usize,
        vertical: usize,
        current: CellState,
        upper: CellState,
        lower: CellState,
    ) -> usize;

    fn should_birth(&self, neighbors: usize, upper: CellState, lower: CellState) -> bool;

    fn should_survive(&self, neighbors: usize, current: CellState, upper: CellState, lower: CellState) -> bool;
}

pub type SharedInteraction = Arc<dyn LayerInteractionRule>;

/// Vertical neighbors count with a weight in [0, 1]
#[derive(Clone)]
pub struct WeightedNeighborsRule {
    base: SharedRule,
    weight: f64,
}

impl WeightedNeighborsRule {
    /// Weight is clamped into [0, 1]
    pub fn new(base: SharedRule, weight: f64) -> Self {
        Self {
            base,
            weight: clamp_unit(weight),
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl LayerInteractionRule for WeightedNeighborsRule {
    fn kind(&self) -> LayerInteractionKind {
        LayerInteractionKind::WeightedNeighbors
    }

    fn calculate_neighbor_count(
        &self,
        horizontal: usize,
        vertical: usize,
        _current: CellState,
        _upper: CellState,
        _lower: CellState,
    ) -> usize {
        horizontal + (vertical as f64 * self.weight).round() as usize
    }

    fn should_birth(&self, neighbors: usize, _upper: CellState, _lower: CellState) -> bool {
        self.base.should_birth(neighbors)
    }

    fn should_survive(&self, neighbors: usize, current: CellState, _upper: CellState, _lower: CellState) -> bool {
        self.base.should_survive(neighbors, current)
    }
}

/// Births only happen where the adjacent layers hold live cells at the same (x, y)
#[derive(Clone)]
pub struct BirthBetweenLayersRule {
    base: SharedRule,
    require_both: bool,
}

impl BirthBetweenLayersRule {
    pub fn new(base: SharedRule, require_both: bool) -> Self {
        Self { base, require_both }
    }
}

impl LayerInteractionRule for BirthBetweenLayersRule {
    fn kind(&self) -> LayerInteractionKind {
        LayerInteractionKind::BirthBetweenLayers
    }

    fn calculate_neighbor_count(
        &self,
        horizontal: usize,
        _vertical: usize,
        _current: CellState,
        _upper: CellState,
        _lower: CellState,
    ) -> usize {
        horizontal
    }

    fn should_birth(&self, neighbors: usize, upper: CellState, lower: CellState) -> bool {
        if !self.base.should_birth(neighbors) {
            return false;
        }
        if self.require_both {
            upper.is_alive() && lower.is_alive()
        } else {
            upper.is_alive() || lower.is_alive()
        }
    }

    fn should_survive(&self, neighbors: usize, current: CellState, _upper: CellState, _lower: CellState) -> bool {
        self.base.should_survive(neighbors, current)
    }
}

/// Treats cell state as energy that flows in from the layers above and below
#[derive(Clone)]
pub struct EnergyDiffusionRule {
    base: SharedRule,
    rate: f64,
    threshold: u8,
}

impl EnergyDiffusionRule {
    /// Rate is clamped into [0, 1]; a zero threshold becomes 1
    pub fn new(base: SharedRule, rate: f64, threshold: u8) -> Self {
        Self {
            base,
            rate: clamp_unit(rate),
            threshold: threshold.max(1),
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Next energy of a cell: its own energy decays by `rate / 10` while half
    /// of the diffused energy from both neighbors flows in. Capped at 255.
    pub fn diffused_energy(&self, current: CellState, upper: CellState, lower: CellState) -> CellState {
        let incoming = (f64::from(upper.energy()) + f64::from(lower.energy())) * self.rate / 2.0;
        let decayed = f64::from(current.energy()) * (1.0 - self.rate * 0.1);
        CellState::from_energy(decayed + incoming)
    }
}

impl LayerInteractionRule for EnergyDiffusionRule {
    fn kind(&self) -> LayerInteractionKind {
        LayerInteractionKind::EnergyDiffusion
    }

    fn calculate_neighbor_count(
        &self,
        horizontal: usize,
        _vertical: usize,
        _current: CellState,
        upper: CellState,
        lower: CellState,
    ) -> usize {
        let diffused = (f64::from(upper.energy()) + f64::from(lower.energy())) * self.rate;
        let threshold = f64::from(self.threshold);

        let effective_vertical = if diffused >= threshold {
            (diffused / threshold).floor() as usize
        } else {
            0
        };
        horizontal + effective_vertical
    }

    fn should_birth(&self, neighbors: usize, _upper: CellState, _lower: CellState) -> bool {
        self.base.should_birth(neighbors)
    }

    fn should_survive(&self, neighbors: usize, current: CellState, _upper: CellState, _lower: CellState) -> bool {
        self.base.should_survive(neighbors, current)
    }
}

/// Clamp into [0, 1]; NaN collapses to 0
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
