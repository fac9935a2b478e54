use super::CellState;
use std::sync::Arc;

/// Trait for birth/survival rules.
/// Rules are stateless and shared read-only between cells, layers and worker threads.
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Whether a dead cell with `neighbors` live neighbors comes alive
    fn should_birth(&self, neighbors: usize) -> bool;

    /// Whether a live cell stays alive. Always false for a dead cell.
    fn should_survive(&self, neighbors: usize, current: CellState) -> bool;

    /// Weight of a neighbor at the given distance, for distance-decay rules
    fn neighbor_weight(&self, _distance: f64) -> f64 {
        1.0
    }
}

/// Shared handle to a rule. Universes and interaction rules hold one of these.
pub type SharedRule = Arc<dyn Rule>;

/// Conway's Game of Life (B3/S23)
/// The classic rule, used with the 8-cell Moore neighborhood
#[derive(Clone, Copy, Debug, Default)]
pub struct ConwayRule;

impl Rule for ConwayRule {
    fn name(&self) -> &'static str {
        "Conway B3/S23"
    }

    fn should_birth(&self, neighbors: usize) -> bool {
        neighbors == 3
    }

    fn should_survive(&self, neighbors: usize, current: CellState) -> bool {
        current.is_alive() && matches!(neighbors, 2 | 3)
    }
}

/// 3D Life (B6/S567), Carter Bays' rule for the 26-cell neighborhood
#[derive(Clone, Copy, Debug, Default)]
pub struct Life3DRule;

impl Rule for Life3DRule {
    fn name(&self) -> &'static str {
        "B6/S567 (3D Life)"
    }

    fn should_birth(&self, neighbors: usize) -> bool {
        neighbors == 6
    }

    fn should_survive(&self, neighbors: usize, current: CellState) -> bool {
        current.is_alive() && (5..=7).contains(&neighbors)
    }
}

/// Get all available rules
pub fn all_rules() -> Vec<(&'static str, SharedRule)> {
    vec![
        ("Conway", Arc::new(ConwayRule) as SharedRule),
        ("Life3D", Arc::new(Life3DRule)),
    ]
}

/// Get default rule (Conway's Life)
pub fn default_rule() -> SharedRule {
    Arc::new(ConwayRule)
}
