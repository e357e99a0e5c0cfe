//! Configuration constants and run parameters for the peppered moth simulator

use crate::environment::BarkMode;
use crate::error::ConfigError;

// ============================================================================
// TIMELINE SETTINGS
// ============================================================================

/// Delay in milliseconds between the end of one generation and the start of the next
pub const GENERATION_DELAY_MS: u64 = 250;

/// Number of generations in a full run; the timeline is terminal at this index
pub const TIMELINE_LENGTH: u32 = 50;

/// Generations of industrialisation before the bark is fully sooty (dynamic bark only)
pub const TIME_TO_FULL_SOOTINESS: u32 = 20;

// ============================================================================
// PREDATION MODEL
// ============================================================================

/// Half-width of the per-generation noise added to the predation counts
pub const RANDOM_VARIANCE: f64 = 0.5;

/// Scale applied to the voracity setting before squaring it.
/// The model says 0.04 is a good middle ground for 100 years; the shorter
/// timeline needs a faster equilibrium.
pub const VORACITY_SCALE: f64 = 3.0 / 20.0;

/// Exponent applied to sootiness when computing light-morph predation.
/// Keeps early soot from hurting light moths much, so evolution "catches up" late.
pub const SOOTINESS_EXPONENT: f64 = 2.25;

// ============================================================================
// PARAMETER RANGES
// ============================================================================

/// Smallest population a run may start with
pub const MIN_POPULATION_SIZE: usize = 20;

/// Population size must be a multiple of this step
pub const POPULATION_STEP: usize = 10;

/// Largest accepted initial dark-morph percentage
pub const MAX_DARK_PERCENT: u32 = 100;

/// Upper bound of the predator voracity slider
pub const MAX_VORACITY: u32 = 10;

// ============================================================================
// DEFAULTS
// ============================================================================

/// Starting population size shown in the control panel
pub const DEFAULT_POPULATION_SIZE: usize = 100;

/// Starting dark-morph percentage (melanic frequency recorded in 1848)
pub const DEFAULT_DARK_PERCENT: u32 = 2;

/// Starting predator voracity
pub const DEFAULT_VORACITY: u32 = 5;

/// Parameters supplied when a run is configured. Immutable while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub population_size: usize,
    pub initial_dark_percent: u32,
    pub predator_voracity: u32,
    pub bark_mode: BarkMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            initial_dark_percent: DEFAULT_DARK_PERCENT,
            predator_voracity: DEFAULT_VORACITY,
            bark_mode: BarkMode::Dynamic,
        }
    }
}

impl SimulationConfig {
    /// Checks every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < MIN_POPULATION_SIZE {
            return Err(ConfigError::PopulationTooSmall {
                size: self.population_size,
                min: MIN_POPULATION_SIZE,
            });
        }
        if self.population_size % POPULATION_STEP != 0 {
            return Err(ConfigError::PopulationNotStepAligned {
                size: self.population_size,
                step: POPULATION_STEP,
            });
        }
        if self.initial_dark_percent > MAX_DARK_PERCENT {
            return Err(ConfigError::DarkPercentOutOfRange(self.initial_dark_percent));
        }
        if self.predator_voracity > MAX_VORACITY {
            return Err(ConfigError::VoracityOutOfRange {
                voracity: self.predator_voracity,
                max: MAX_VORACITY,
            });
        }
        Ok(())
    }
}
