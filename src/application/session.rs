use crate::domain::{
    presets, CellState, Coord, Dimension, Life3DRule, Pattern, StepStrategy, Universe, Universe2D,
    Universe25D, Universe3D, default_rule,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// The universe a session drives
#[derive(Clone)]
pub enum World {
    Flat(Universe2D),
    Layered(Universe25D),
    Volume(Universe3D),
}

impl World {
    /// Empty world of the given kind with its usual rule:
    /// Conway for flat and layered worlds, B6/S567 for volumes
    pub fn new(dimension: Dimension, width: usize, height: usize, depth: usize) -> Self {
        match dimension {
            Dimension::TwoD => World::Flat(Universe2D::new(width, height, default_rule())),
            Dimension::TwoAndHalfD => World::Layered(Universe25D::new(width, height, depth, default_rule())),
            Dimension::ThreeD => World::Volume(Universe3D::new(width, height, depth, Arc::new(Life3DRule))),
        }
    }

    pub fn universe(&self) -> &dyn Universe {
        match self {
            World::Flat(u) => u,
            World::Layered(u) => u,
            World::Volume(u) => u,
        }
    }

    pub fn universe_mut(&mut self) -> &mut dyn Universe {
        match self {
            World::Flat(u) => u,
            World::Layered(u) => u,
            World::Volume(u) => u,
        }
    }

    /// Advance one generation. Only volumes honour the parallel strategy.
    pub fn step(&mut self, strategy: StepStrategy) {
        match (self, strategy) {
            (World::Volume(u), StepStrategy::Parallel) => u.step_parallel(),
            (world, _) => world.universe_mut().step(),
        }
    }

    /// Number of layers a viewer can page through
    pub fn layer_count(&self) -> usize {
        match self {
            World::Flat(_) => 1,
            World::Layered(u) => u.depth(),
            World::Volume(u) => u.depth(),
        }
    }

    /// State at (x, y) on the viewed layer
    pub fn view_cell(&self, x: i32, y: i32, layer: usize) -> CellState {
        self.universe().get(Coord::new_3d(x, y, layer as i32))
    }

    /// Pattern seeded by `Command::Seed`
    fn default_pattern(&self) -> Pattern {
        match self {
            World::Flat(_) => presets::glider(),
            World::Layered(_) => presets::stacked_blinkers(),
            World::Volume(_) => presets::block_3d(),
        }
    }
}

/// Whether generations advance on `tick`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

/// Host input, already decoded from whatever event source drives the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    StepOnce,
    Clear,
    Randomize,
    Seed,
    SpeedUp,
    SpeedDown,
    LayerUp,
    LayerDown,
    ToggleInteraction,
    CycleStrategy,
}

/// Session orchestrates a simulation: run state, pacing and the viewed layer.
/// The universes themselves know nothing about time.
pub struct Session {
    pub world: World,
    pub run_state: RunState,
    pub strategy: StepStrategy,
    pub generation: u64,
    pub update_timer: f32,
    pub updates_per_second: f32,
    pub view_layer: usize,
    pub population: usize,
    pub last_step_time_ms: f32,
}

impl Session {
    pub fn new(world: World) -> Self {
        let population = world.universe().count_living();
        Self {
            view_layer: world.layer_count() / 2,
            world,
            run_state: RunState::Paused,
            strategy: StepStrategy::default(),
            generation: 0,
            update_timer: 0.0,
            updates_per_second: 10.0,
            population,
            last_step_time_ms: 0.0,
        }
    }

    /// Set stepping strategy (builder pattern)
    pub fn with_strategy(mut self, strategy: StepStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set simulation speed (builder pattern)
    pub fn with_speed(mut self, updates_per_second: f32) -> Self {
        self.updates_per_second = updates_per_second.clamp(1.0, 60.0);
        self
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Apply one host command
    pub fn apply(self, command: Command) -> Self {
        match command {
            Command::TogglePause => self.toggle_running(),
            Command::StepOnce => self.step_once(),
            Command::Clear => self.clear(),
            Command::Randomize => self.randomize(),
            Command::Seed => self.seed(),
            Command::SpeedUp => self.adjust_speed(1.0),
            Command::SpeedDown => self.adjust_speed(-1.0),
            Command::LayerUp => self.shift_layer(1),
            Command::LayerDown => self.shift_layer(-1),
            Command::ToggleInteraction => self.toggle_interaction(),
            Command::CycleStrategy => self.cycle_strategy(),
        }
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        self.run_state = match self.run_state {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
        };
        info!(state = ?self.run_state, generation = self.generation, "run state changed");
        self
    }

    /// Advance exactly one generation, regardless of run state
    pub fn step_once(mut self) -> Self {
        self.advance();
        self
    }

    /// Clear the world and reset generation counter
    pub fn clear(mut self) -> Self {
        self.world.universe_mut().clear();
        self.reset("cleared")
    }

    /// Randomize the world and reset generation counter
    pub fn randomize(mut self) -> Self {
        self.world.universe_mut().randomize();
        self.reset("randomized")
    }

    /// Place the world's default pattern in the middle
    pub fn seed(mut self) -> Self {
        let pattern = self.world.default_pattern();
        let offset = pattern.centered_offset(self.world.universe());
        pattern.place_on(self.world.universe_mut(), offset);
        self.population = self.world.universe().count_living();
        info!(pattern = pattern.name, population = self.population, "pattern seeded");
        self
    }

    /// Adjust simulation speed
    pub fn adjust_speed(mut self, delta: f32) -> Self {
        self.updates_per_second = (self.updates_per_second + delta).clamp(1.0, 60.0);
        self
    }

    fn shift_layer(mut self, delta: isize) -> Self {
        let last = self.world.layer_count().saturating_sub(1);
        self.view_layer = self.view_layer.saturating_add_signed(delta).min(last);
        self
    }

    /// Flip cross-layer interaction; only layered worlds have it
    pub fn toggle_interaction(mut self) -> Self {
        if let World::Layered(universe) = &mut self.world {
            let enabled = !universe.layer_interaction();
            universe.set_layer_interaction(enabled);
            info!(enabled, rule = %universe.interaction_rule().kind(), "layer interaction toggled");
        }
        self
    }

    pub fn cycle_strategy(mut self) -> Self {
        self.strategy = self.strategy.cycle();
        info!(strategy = self.strategy.name(), "step strategy changed");
        self
    }

    /// Update simulation by one frame.
    /// Advances at most one generation once the update interval has elapsed.
    pub fn tick(mut self, delta_time: f32) -> Self {
        if !self.is_running() {
            return self;
        }

        self.update_timer += delta_time;
        let update_interval = 1.0 / self.updates_per_second;

        if self.update_timer >= update_interval {
            self.advance();
            self.update_timer = 0.0;
        }

        self
    }

    fn advance(&mut self) {
        let start = Instant::now();
        self.world.step(self.strategy);
        self.last_step_time_ms = start.elapsed().as_secs_f32() * 1000.0;

        self.generation += 1;
        self.population = self.world.universe().count_living();
        debug!(
            generation = self.generation,
            population = self.population,
            elapsed_ms = self.last_step_time_ms,
            "generation advanced"
        );
    }

    fn reset(mut self, reason: &'static str) -> Self {
        self.generation = 0;
        self.update_timer = 0.0;
        self.run_state = RunState::Paused;
        self.population = self.world.universe().count_living();
        info!(reason, population = self.population, "world reset");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_session() -> Session {
        Session::new(World::new(Dimension::TwoD, 20, 20, 1))
    }

    #[test]
    fn test_new_session_is_paused() {
        let session = flat_session();
        assert_eq!(session.run_state, RunState::Paused);
        assert_eq!(session.generation, 0);
        assert_eq!(session.population, 0);
    }

    #[test]
    fn test_tick_does_nothing_while_paused() {
        let session = flat_session().seed().tick(10.0);
        assert_eq!(session.generation, 0);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let session = flat_session().seed().with_speed(10.0).apply(Command::TogglePause);

        let session = session.tick(0.05);
        assert_eq!(session.generation, 0);

        let session = session.tick(0.06);
        assert_eq!(session.generation, 1);
        assert_eq!(session.update_timer, 0.0);

        // A long frame still advances only one generation
        let session = session.tick(5.0);
        assert_eq!(session.generation, 2);
        assert_eq!(session.population, 5);
    }

    #[test]
    fn test_step_once_while_paused() {
        let session = flat_session().seed().apply(Command::StepOnce);
        assert_eq!(session.generation, 1);
        assert_eq!(session.population, 5);
        assert!(!session.is_running());
    }

    #[test]
    fn test_clear_and_randomize_reset() {
        let session = flat_session()
            .seed()
            .apply(Command::TogglePause)
            .apply(Command::StepOnce)
            .apply(Command::Clear);
        assert_eq!(session.generation, 0);
        assert_eq!(session.population, 0);
        assert!(!session.is_running());

        let session = session.apply(Command::StepOnce).apply(Command::Randomize);
        assert_eq!(session.generation, 0);
        assert!(session.population > 0);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut session = flat_session();
        for _ in 0..100 {
            session = session.apply(Command::SpeedUp);
        }
        assert_eq!(session.updates_per_second, 60.0);
        for _ in 0..100 {
            session = session.apply(Command::SpeedDown);
        }
        assert_eq!(session.updates_per_second, 1.0);
    }

    #[test]
    fn test_layer_navigation_is_clamped() {
        let mut session = Session::new(World::new(Dimension::ThreeD, 4, 4, 4));
        assert_eq!(session.view_layer, 2);
        for _ in 0..10 {
            session = session.apply(Command::LayerUp);
        }
        assert_eq!(session.view_layer, 3);
        for _ in 0..10 {
            session = session.apply(Command::LayerDown);
        }
        assert_eq!(session.view_layer, 0);

        let flat = flat_session().apply(Command::LayerUp);
        assert_eq!(flat.view_layer, 0);
    }

    #[test]
    fn test_toggle_interaction_only_on_layers() {
        let session = Session::new(World::new(Dimension::TwoAndHalfD, 8, 8, 3))
            .apply(Command::ToggleInteraction);
        assert!(matches!(&session.world, World::Layered(u) if u.layer_interaction()));

        // No-op elsewhere
        let flat = flat_session().seed().apply(Command::ToggleInteraction);
        assert_eq!(flat.population, 5);
    }

    #[test]
    fn test_volume_strategies_agree() {
        let seeded = Session::new(World::new(Dimension::ThreeD, 10, 10, 10)).seed();
        let mut cells = Vec::new();
        for strategy in StepStrategy::all() {
            let mut session = Session::new(seeded.world.clone()).with_strategy(strategy);
            for _ in 0..3 {
                session = session.step_once();
            }
            assert_eq!(session.population, 8);
            if let World::Volume(u) = &session.world {
                cells.push(u.cells().to_vec());
            }
        }
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], cells[1]);
    }

    #[test]
    fn test_cycle_strategy() {
        let session = flat_session().with_strategy(StepStrategy::Sequential);
        assert_eq!(session.apply(Command::CycleStrategy).strategy, StepStrategy::Parallel);
    }

    #[test]
    fn test_view_cell_reads_layer() {
        let session = Session::new(World::new(Dimension::TwoAndHalfD, 8, 8, 3)).seed();
        // Stacked blinkers are centered: x in 2..5, y = 4
        for layer in 0..3 {
            assert!(session.world.view_cell(3, 4, layer).is_alive());
        }
        assert!(!session.world.view_cell(3, 4, 5).is_alive());
    }
}
