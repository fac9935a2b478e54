//! Step strategy selection for volume universes.
//!
//! Flat and layered universes always step sequentially; a volume can also
//! step with Z-slab parallelism.

/// How a volume universe advances one generation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StepStrategy {
    /// Single-threaded interior/boundary sweep
    Sequential,
    /// One worker per Z slab, joined before the buffer swap
    #[default]
    Parallel,
}

impl StepStrategy {
    /// Get all available strategies
    pub fn all() -> Vec<StepStrategy> {
        vec![StepStrategy::Sequential, StepStrategy::Parallel]
    }

    /// Display name for the HUD
    pub fn name(&self) -> &'static str {
        match self {
            StepStrategy::Sequential => "Sequential",
            StepStrategy::Parallel => "Z-Parallel",
        }
    }

    /// Parse a config value (`sequential` / `parallel`, case-insensitive)
    pub fn parse(value: &str) -> Option<StepStrategy> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sequential" | "serial" => Some(StepStrategy::Sequential),
            "parallel" => Some(StepStrategy::Parallel),
            _ => None,
        }
    }

    /// Next strategy in `all()` order, wrapping around
    pub fn cycle(self) -> StepStrategy {
        match self {
            StepStrategy::Sequential => StepStrategy::Parallel,
            StepStrategy::Parallel => StepStrategy::Sequential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_parallel() {
        assert_eq!(StepStrategy::default(), StepStrategy::Parallel);
    }

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = StepStrategy::all().iter().map(|s| s.name()).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_parse() {
        assert_eq!(StepStrategy::parse("Parallel"), Some(StepStrategy::Parallel));
        assert_eq!(StepStrategy::parse(" sequential "), Some(StepStrategy::Sequential));
        assert_eq!(StepStrategy::parse("gpu"), None);
    }

    #[test]
    fn test_cycle_visits_all() {
        let start = StepStrategy::Sequential;
        assert_eq!(start.cycle(), StepStrategy::Parallel);
        assert_eq!(start.cycle().cycle(), start);
    }
}
