//! Peppered moth natural-selection simulator.
//!
//! A population of light and dark moths is preyed upon under bark whose
//! sootiness evolves over a fixed 50-generation timeline. The engine lives in
//! [`simulation::GenerationSimulator`]; [`plugin::MothSimulationPlugin`] hosts
//! it inside a bevy app.

pub mod config;
pub mod environment;
pub mod error;
pub mod moth;
pub mod plugin;
pub mod population;
pub mod predation;
pub mod scheduler;
pub mod simulation;

pub use config::SimulationConfig;
pub use environment::{BarkMode, Environment};
pub use error::{ConfigError, PopulationError, SimulationError};
pub use moth::{Moth, MothId, Morph};
pub use plugin::MothSimulationPlugin;
pub use population::{CommitReport, PopulationStore};
pub use predation::{Predation, compute_predation};
pub use simulation::{
    GenerationSimulator, SimulationEvent, SimulationObserver, SimulationState, Snapshot,
    StopReason,
};
