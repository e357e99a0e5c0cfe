use thiserror::Error;

use crate::moth::MothId;

/// Rejected simulation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("population size {size} is below the minimum of {min}")]
    PopulationTooSmall { size: usize, min: usize },
    #[error("population size {size} is not a multiple of {step}")]
    PopulationNotStepAligned { size: usize, step: usize },
    #[error("initial dark percentage {0} is outside 0..=100")]
    DarkPercentOutOfRange(u32),
    #[error("predator voracity {voracity} is outside 0..={max}")]
    VoracityOutOfRange { voracity: u32, max: u32 },
}

/// Invalid staging requests against the population store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PopulationError {
    #[error("no moth with id {0} in the population")]
    UnknownMoth(MothId),
    #[error("moth {0} is already staged for removal")]
    AlreadyStaged(MothId),
}

/// Errors surfaced by the generation simulator's public controls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("population error: {0}")]
    Population(#[from] PopulationError),
    #[error("simulation is already running")]
    AlreadyRunning,
    #[error("timeline is already at generation {0}; reset before starting again")]
    HorizonReached(u32),
    #[error("population is empty; configure or repopulate before starting")]
    NotPopulated,
}
