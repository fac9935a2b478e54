// Domain layer - universes, rules and layer interaction
pub mod domain;

// Application layer - session state machine and configuration
pub mod application;

// Infrastructure layer - viewer rendering and input
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{
    CellState, Coord, Dimension, Rule, Universe, Universe2D, Universe25D, Universe3D,
    ConwayRule, Life3DRule, StepStrategy,
};
pub use application::{Command, Config, Session, World};
