use crate::config::{MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, SimulationConfig};
use crate::domain::{DEFAULT_DENSITY, GenerationBuffer, SeedPolicy, Stepper, presets};
use crate::error::Result;

/// Simulation drives the stepper on a fixed tick interval.
/// This is the application layer that coordinates domain logic.
pub struct Simulation {
    pub stepper: Stepper,
    pub is_running: bool,
    pub update_timer: f32,
    pub tick_interval_ms: u64,
    pub last_step_time_ms: f32, // Step performance metric
    /// Set when a step fails; the run is paused until the next reseed
    pub last_error: Option<String>,
    seed_policy: SeedPolicy,
    /// Next entry of `presets::all_patterns` for `next_pattern`
    pattern_index: usize,
}

impl Simulation {
    /// Seed the first generation and build the configured kernel.
    ///
    /// With `Backend::Gpu` this is where an unsupported environment surfaces.
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let initial = config
            .seed_policy
            .generate(config.grid_width, config.grid_height)?;
        let kernel = config.backend.kernel(config.grid_width, config.grid_height)?;

        log::info!(
            "Starting {}x{} grid: {} seeding, {} backend ({}), {}ms ticks",
            config.grid_width,
            config.grid_height,
            config.seed_policy.name(),
            config.backend.name(),
            config.backend.description(),
            config.tick_interval_ms
        );
        log::debug!("Initial population: {}", initial.count_alive());

        let mut simulation = Self::from_stepper(Stepper::new(initial, kernel), config.tick_interval_ms);
        simulation.seed_policy = config.seed_policy.clone();
        Ok(simulation)
    }

    /// Wrap an existing stepper; starts running
    pub fn from_stepper(stepper: Stepper, tick_interval_ms: u64) -> Self {
        Self {
            stepper,
            is_running: true,
            update_timer: 0.0,
            tick_interval_ms,
            last_step_time_ms: 0.0,
            last_error: None,
            seed_policy: SeedPolicy::default(),
            pattern_index: 0,
        }
    }

    pub fn current(&self) -> &GenerationBuffer {
        self.stepper.current()
    }

    pub fn generation(&self) -> u64 {
        self.stepper.generation()
    }

    /// Set running state (builder pattern)
    pub fn with_running(mut self, running: bool) -> Self {
        self.is_running = running;
        self
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running && self.last_error.is_none();
        self.update_timer = 0.0;
        self
    }

    /// Advance a single generation while paused
    pub fn step_once(mut self) -> Self {
        if !self.is_running {
            self.advance();
        }
        self
    }

    /// Restart from the policy the run was configured with
    pub fn reseed(self) -> Self {
        let policy = self.seed_policy.clone();
        self.reseed_with(&policy)
    }

    /// Replace the grid using another policy, keeping dimensions
    pub fn reseed_with(mut self, policy: &SeedPolicy) -> Self {
        let (width, height) = self.stepper.dimensions();
        match policy.generate(width, height) {
            Ok(grid) => {
                log::debug!("Reseeded with {} policy, {} alive", policy.name(), grid.count_alive());
                self.stepper.reseed(grid);
                self.last_error = None;
                self.update_timer = 0.0;
            }
            Err(e) => log::warn!("Ignoring {} reseed: {}", policy.name(), e),
        }
        self
    }

    /// Fresh random layout at the default density, whatever the configured policy
    pub fn reseed_random(self) -> Self {
        self.reseed_with(&SeedPolicy::random(DEFAULT_DENSITY))
    }

    /// Center the next preset pattern on an empty grid
    pub fn next_pattern(mut self) -> Self {
        let patterns = presets::all_patterns();
        let pattern = patterns[self.pattern_index % patterns.len()].clone();
        self.pattern_index = (self.pattern_index + 1) % patterns.len();
        log::info!("Pattern: {} ({})", pattern.name, pattern.description);
        self.reseed_with(&SeedPolicy::Pattern(pattern))
    }

    /// Kill every cell and reset the generation counter
    pub fn clear(self) -> Self {
        let (width, height) = self.stepper.dimensions();
        match GenerationBuffer::new(width, height) {
            Ok(empty) => self.reseed_with(&SeedPolicy::Explicit(empty)),
            Err(_) => self,
        }
    }

    /// Halve (faster) or double (slower) the tick interval
    pub fn adjust_speed(mut self, faster: bool) -> Self {
        let interval = if faster {
            self.tick_interval_ms / 2
        } else {
            self.tick_interval_ms * 2
        };
        self.tick_interval_ms = interval.clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS);
        self
    }

    /// Update simulation by one frame.
    /// Steps at most once per call; a long frame does not queue extra steps.
    pub fn tick(mut self, delta_time: f32) -> Self {
        if !self.is_running {
            return self;
        }

        self.update_timer += delta_time;
        let interval = self.tick_interval_ms as f32 / 1000.0;

        if self.update_timer >= interval {
            self.update_timer -= interval;
            if self.update_timer >= interval {
                self.update_timer = 0.0;
            }
            self.advance();
        }

        self
    }

    fn advance(&mut self) {
        let start = std::time::Instant::now();
        match self.stepper.step().map(GenerationBuffer::count_alive) {
            Ok(alive) => {
                log::trace!("Generation {}: {} alive", self.stepper.generation(), alive);
            }
            Err(e) => {
                log::error!("Step failed on {} backend: {}", self.stepper.kernel_name(), e);
                self.last_error = Some(e.to_string());
                self.is_running = false;
            }
        }
        self.last_step_time_ms = start.elapsed().as_secs_f32() * 1000.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Backend, Kernel, SerialKernel, presets};
    use crate::error::LifeError;

    fn blinker_sim() -> Simulation {
        let grid = presets::blinker().centered(5, 5).unwrap();
        Simulation::from_stepper(Stepper::new(grid, Box::new(SerialKernel)), 200)
    }

    struct FailingKernel;

    impl Kernel for FailingKernel {
        fn name(&self) -> &'static str {
            "Failing"
        }

        fn advance(&mut self, _: &GenerationBuffer, _: &mut GenerationBuffer) -> Result<()> {
            Err(LifeError::Gpu("device lost".into()))
        }
    }

    #[test]
    fn test_new_from_cpu_config() {
        let config = SimulationConfig::default()
            .with_grid(16, 8)
            .with_seed_policy(SeedPolicy::seeded(0.4, 1))
            .with_backend(Backend::Parallel);
        let sim = Simulation::new(&config).unwrap();
        assert_eq!(sim.current().dimensions(), (16, 8));
        assert_eq!(sim.stepper.kernel_name(), "CPU+Par");
        assert_eq!(sim.generation(), 0);
        assert!(sim.is_running);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig::default()
            .with_backend(Backend::Serial)
            .with_tick_interval_ms(0);
        assert!(Simulation::new(&config).is_err());
    }

    #[test]
    fn test_tick_fires_on_interval() {
        let sim = blinker_sim().tick(0.15);
        assert_eq!(sim.generation(), 0);

        let sim = sim.tick(0.1);
        assert_eq!(sim.generation(), 1);
        assert!(sim.current().is_alive(2, 1));
    }

    #[test]
    fn test_long_frame_steps_once() {
        let sim = blinker_sim().tick(1.0);
        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.update_timer, 0.0);

        let sim = sim.tick(0.1);
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_paused_does_not_step() {
        let sim = blinker_sim().with_running(false).tick(5.0);
        assert_eq!(sim.generation(), 0);

        let sim = sim.step_once();
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_step_once_ignored_while_running() {
        let sim = blinker_sim().step_once();
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_clear_and_reseed() {
        let sim = blinker_sim().tick(0.3).clear();
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.current().count_alive(), 0);

        let sim = sim.reseed_with(&SeedPolicy::Parity);
        assert_eq!(sim.current().count_alive(), 12);

        // Bad policies leave the grid alone
        let sim = sim.reseed_with(&SeedPolicy::random(2.0));
        assert_eq!(sim.current().count_alive(), 12);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut sim = blinker_sim();
        for _ in 0..10 {
            sim = sim.adjust_speed(true);
        }
        assert_eq!(sim.tick_interval_ms, MIN_TICK_INTERVAL_MS);
        for _ in 0..10 {
            sim = sim.adjust_speed(false);
        }
        assert_eq!(sim.tick_interval_ms, MAX_TICK_INTERVAL_MS);
    }

    #[test]
    fn test_step_failure_pauses() {
        let grid = GenerationBuffer::new(4, 4).unwrap();
        let sim = Simulation::from_stepper(Stepper::new(grid, Box::new(FailingKernel)), 100).tick(0.2);
        assert!(!sim.is_running);
        assert_eq!(sim.generation(), 0);
        assert!(sim.last_error.as_deref().is_some_and(|e| e.contains("device lost")));

        // Cannot resume until reseeded
        let sim = sim.toggle_running();
        assert!(!sim.is_running);
    }

    #[test]
    fn test_clear_recovers_from_failure() {
        let grid = presets::blinker().centered(5, 5).unwrap();
        let sim = Simulation::from_stepper(Stepper::new(grid, Box::new(FailingKernel)), 100).tick(0.2);
        assert!(sim.last_error.is_some());

        let sim = sim.clear();
        assert!(sim.last_error.is_none());
        assert_eq!(sim.update_timer, 0.0);
        assert_eq!(sim.current().count_alive(), 0);

        let sim = sim.toggle_running();
        assert!(sim.is_running);
    }

    #[test]
    fn test_reseed_random_ignores_configured_policy() {
        let config = SimulationConfig::default()
            .with_grid(20, 20)
            .with_seed_policy(SeedPolicy::Parity)
            .with_backend(Backend::Serial);
        let sim = Simulation::new(&config).unwrap().reseed();
        assert_eq!(sim.current().count_alive(), 200);

        // 400 cells at 40%: an exact parity layout is practically impossible
        let sim = sim.reseed_random();
        assert_ne!(sim.current(), &SeedPolicy::Parity.generate(20, 20).unwrap());
    }

    #[test]
    fn test_next_pattern_cycles_presets() {
        let grid = GenerationBuffer::new(32, 32).unwrap();
        let mut sim = Simulation::from_stepper(Stepper::new(grid, Box::new(SerialKernel)), 200);
        for pattern in presets::all_patterns() {
            sim = sim.next_pattern();
            assert_eq!(sim.current(), &pattern.centered(32, 32).unwrap());
        }
        // Wraps back to the first preset
        let first = presets::all_patterns()[0].centered(32, 32).unwrap();
        assert_eq!(sim.next_pattern().current(), &first);
    }
}
