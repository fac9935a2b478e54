mod cell;
mod rules;
mod universe;
mod universe2d;
mod universe3d;
mod universe25d;
mod layer_interaction;
mod patterns;
mod strategy;

pub use cell::{CellState, Coord, Dimension};
pub use rules::{Rule, SharedRule, ConwayRule, Life3DRule, all_rules, default_rule};
pub use universe::Universe;
pub use universe2d::Universe2D;
pub use universe3d::{Universe3D, MOORE_3D};
pub use universe25d::{Universe25D, DEFAULT_VERTICAL_WEIGHT};
pub use layer_interaction::{
    LayerInteractionRule, LayerInteractionKind, SharedInteraction,
    WeightedNeighborsRule, BirthBetweenLayersRule, EnergyDiffusionRule,
};
pub use patterns::{Pattern, presets};
pub use strategy::StepStrategy;
