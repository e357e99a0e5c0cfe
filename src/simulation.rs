//! Generation simulator: the play/pause/reset state machine and the
//! per-generation predation and replacement step.

use std::time::Duration;

use bevy::log::{debug, info};
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::{GENERATION_DELAY_MS, RANDOM_VARIANCE, SimulationConfig, TIMELINE_LENGTH};
use crate::environment::Environment;
use crate::error::SimulationError;
use crate::moth::{Moth, MothId, Morph};
use crate::population::PopulationStore;
use crate::predation::{Predation, compute_predation};
use crate::scheduler::{Scheduler, TaskHandle};

/// Whether generations are currently being scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationState {
    #[default]
    Idle,
    Running,
}

/// Why a run went back to idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Requested,
    HorizonReached,
}

/// Population counts and bark state after a generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub light_count: usize,
    pub dark_count: usize,
    pub total_count: usize,
    pub time_index: u32,
    pub sootiness: f64,
}

impl Snapshot {
    fn capture(population: &PopulationStore, time_index: u32, environment: &Environment) -> Self {
        Self {
            light_count: population.count_by_morph(Morph::Light),
            dark_count: population.count_by_morph(Morph::Dark),
            total_count: population.len(),
            time_index,
            sootiness: environment.sootiness(),
        }
    }

    /// Opacity of the clean bark layer drawn over the sooty one
    pub fn light_bark_opacity(&self) -> f64 {
        1.0 - self.sootiness
    }

    pub fn dark_bark_opacity(&self) -> f64 {
        1.0
    }

    /// Share of the population carrying the dark morph, 0 when empty
    pub fn dark_fraction(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.dark_count as f64 / self.total_count as f64
        }
    }
}

/// Receives everything the simulator reports to the presentation layer
pub trait SimulationObserver {
    /// Called once per completed generation, after the commit
    fn on_generation(&mut self, snapshot: &Snapshot, predation: &Predation);

    fn on_moth_born(&mut self, _moth: &Moth) {}

    fn on_moth_eaten(&mut self, _moth: &Moth) {}

    /// Called once whenever a run halts
    fn on_stopped(&mut self, snapshot: &Snapshot, reason: StopReason);
}

/// Recorded form of the observer callbacks
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    Generation { snapshot: Snapshot, predation: Predation },
    MothBorn(Moth),
    MothEaten(Moth),
    Stopped { snapshot: Snapshot, reason: StopReason },
}

impl SimulationObserver for Vec<SimulationEvent> {
    fn on_generation(&mut self, snapshot: &Snapshot, predation: &Predation) {
        self.push(SimulationEvent::Generation {
            snapshot: *snapshot,
            predation: *predation,
        });
    }

    fn on_moth_born(&mut self, moth: &Moth) {
        self.push(SimulationEvent::MothBorn(*moth));
    }

    fn on_moth_eaten(&mut self, moth: &Moth) {
        self.push(SimulationEvent::MothEaten(*moth));
    }

    fn on_stopped(&mut self, snapshot: &Snapshot, reason: StopReason) {
        self.push(SimulationEvent::Stopped {
            snapshot: *snapshot,
            reason,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimulationTask {
    Generation,
}

/// Owns the whole simulation context: population, environment, clock and pending step.
#[derive(Resource)]
pub struct GenerationSimulator {
    config: SimulationConfig,
    population: PopulationStore,
    environment: Environment,
    time_index: u32,
    state: SimulationState,
    stop_requested: bool,
    scheduler: Scheduler<SimulationTask>,
    pending_step: Option<TaskHandle>,
    generation_delay: Duration,
    rng: StdRng,
}

impl Default for GenerationSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationSimulator {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// A simulator whose predation noise and victim choice are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let config = SimulationConfig::default();
        Self {
            config,
            population: PopulationStore::new(),
            environment: Environment::new(config.bark_mode, 0),
            time_index: 0,
            state: SimulationState::Idle,
            stop_requested: false,
            scheduler: Scheduler::new(),
            pending_step: None,
            generation_delay: Duration::from_millis(GENERATION_DELAY_MS),
            rng,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn population(&self) -> &PopulationStore {
        &self.population
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn sootiness(&self) -> f64 {
        self.environment.sootiness()
    }

    pub fn time_index(&self) -> u32 {
        self.time_index
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// True while a generation is waiting on its delay
    pub fn has_pending_step(&self) -> bool {
        self.pending_step
            .is_some_and(|handle| self.scheduler.is_pending(handle))
    }

    pub fn generation_delay(&self) -> Duration {
        self.generation_delay
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.population, self.time_index, &self.environment)
    }

    /// Validates and stores `config`, resets the run and populates it.
    pub fn configure(&mut self, config: SimulationConfig) -> Result<(), SimulationError> {
        if self.is_running() {
            return Err(SimulationError::AlreadyRunning);
        }
        config.validate()?;
        self.config = config;
        info!(
            "configured: {} moths, {}% dark, voracity {}, {} bark",
            config.population_size,
            config.initial_dark_percent,
            config.predator_voracity,
            config.bark_mode
        );
        self.repopulate()
    }

    /// Resets and regenerates the starting population from the stored configuration.
    pub fn repopulate(&mut self) -> Result<(), SimulationError> {
        if self.is_running() {
            return Err(SimulationError::AlreadyRunning);
        }
        self.reset();
        self.population
            .initialize(self.config.population_size, self.config.initial_dark_percent);
        Ok(())
    }

    /// Moves from idle to running and schedules the first generation.
    ///
    /// At the end of the timeline the stop notification is emitted and
    /// [`SimulationError::HorizonReached`] returned.
    pub fn start(&mut self, observer: &mut dyn SimulationObserver) -> Result<(), SimulationError> {
        if self.is_running() {
            return Err(SimulationError::AlreadyRunning);
        }
        if self.time_index >= TIMELINE_LENGTH {
            observer.on_stopped(&self.snapshot(), StopReason::HorizonReached);
            return Err(SimulationError::HorizonReached(self.time_index));
        }
        if self.population.is_empty() {
            return Err(SimulationError::NotPopulated);
        }

        self.state = SimulationState::Running;
        self.stop_requested = false;
        self.schedule_generation();
        info!("simulation started at generation {}", self.time_index);
        Ok(())
    }

    /// Asks a running simulation to halt at the next generation boundary.
    ///
    /// The step already waiting on its delay still runs and commits. Returns
    /// false when nothing is running.
    pub fn request_stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.stop_requested = true;
        debug!("stop requested at generation {}", self.time_index);
        true
    }

    /// Clears the population, rewinds the clock and cancels any pending generation.
    pub fn reset(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        self.pending_step = None;
        self.population.clear();
        self.time_index = 0;
        self.environment
            .set_bark_mode(self.config.bark_mode, self.time_index);
        self.state = SimulationState::Idle;
        self.stop_requested = false;
        if cancelled > 0 {
            info!("simulation reset, cancelled {} pending generation", cancelled);
        } else {
            debug!("simulation reset");
        }
    }

    /// Feeds elapsed time to the scheduler and runs every generation that came due.
    pub fn tick(
        &mut self,
        delta: Duration,
        observer: &mut dyn SimulationObserver,
    ) -> Result<(), SimulationError> {
        for task in self.scheduler.tick(delta) {
            match task {
                SimulationTask::Generation => {
                    self.pending_step = None;
                    self.run_generation(observer)?;
                }
            }
        }
        Ok(())
    }

    /// Runs one generation: predation, replacement, commit, clock advance, report.
    fn run_generation(
        &mut self,
        observer: &mut dyn SimulationObserver,
    ) -> Result<(), SimulationError> {
        if !self.is_running() {
            return Ok(());
        }

        let light: Vec<MothId> = self
            .population
            .moths_by_morph(Morph::Light)
            .map(|moth| moth.id)
            .collect();
        let dark: Vec<MothId> = self
            .population
            .moths_by_morph(Morph::Dark)
            .map(|moth| moth.id)
            .collect();

        let random_variance = self.rng.gen_range(-RANDOM_VARIANCE..RANDOM_VARIANCE);
        let predation = compute_predation(
            light.len(),
            dark.len(),
            self.environment.sootiness(),
            self.config.predator_voracity,
            random_variance,
        );

        // Each eaten moth is replaced by an offspring of the surviving morph.
        for &id in dark.choose_multiple(&mut self.rng, predation.dark_eaten) {
            self.population.stage_removal(id)?;
            self.population.stage_birth(Morph::Light);
        }
        for &id in light.choose_multiple(&mut self.rng, predation.light_eaten) {
            self.population.stage_removal(id)?;
            self.population.stage_birth(Morph::Dark);
        }

        let report = self.population.commit();
        for moth in &report.eaten {
            observer.on_moth_eaten(moth);
        }
        for moth in &report.born {
            observer.on_moth_born(moth);
        }

        self.time_index += 1;
        self.environment.update(self.time_index);

        let snapshot = self.snapshot();
        debug!(
            "generation {}: {} light eaten, {} dark eaten, {} light / {} dark, sootiness {:.2}",
            snapshot.time_index,
            predation.light_eaten,
            predation.dark_eaten,
            snapshot.light_count,
            snapshot.dark_count,
            snapshot.sootiness
        );
        observer.on_generation(&snapshot, &predation);

        if self.time_index < TIMELINE_LENGTH && !self.stop_requested {
            self.schedule_generation();
        } else {
            let reason = if self.time_index >= TIMELINE_LENGTH {
                StopReason::HorizonReached
            } else {
                StopReason::Requested
            };
            self.state = SimulationState::Idle;
            self.stop_requested = false;
            info!(
                "simulation stopped at generation {} ({:?}): {} light / {} dark",
                self.time_index, reason, snapshot.light_count, snapshot.dark_count
            );
            observer.on_stopped(&snapshot, reason);
        }
        Ok(())
    }

    fn schedule_generation(&mut self) {
        let handle = self
            .scheduler
            .schedule(self.generation_delay, SimulationTask::Generation);
        self.pending_step = Some(handle);
    }
}
