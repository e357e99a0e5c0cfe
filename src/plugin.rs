use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::moth::Moth;
use crate::predation::Predation;
use crate::simulation::{GenerationSimulator, SimulationEvent, Snapshot, StopReason};

/// Control requests sent by the presentation layer
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SimulationCommand {
    Configure(SimulationConfig),
    Repopulate,
    Start,
    RequestStop,
    /// Start when idle, request a stop when running
    TogglePlay,
    Reset,
}

/// A generation finished and was committed
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GenerationEvent {
    pub snapshot: Snapshot,
    pub predation: Predation,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MothBorn(pub Moth);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MothEaten(pub Moth);

/// The run went back to idle
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SimulationStopped {
    pub snapshot: Snapshot,
    pub reason: StopReason,
}

/// A command the simulator refused
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CommandRejected {
    pub command: SimulationCommand,
    pub error: SimulationError,
}

/// Hosts a [`GenerationSimulator`] resource and drives it from frame time
#[derive(Default)]
pub struct MothSimulationPlugin {
    /// Fixed seed for reproducible runs; entropy when `None`
    pub seed: Option<u64>,
}

impl MothSimulationPlugin {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl Plugin for MothSimulationPlugin {
    fn build(&self, app: &mut App) {
        let simulator = match self.seed {
            Some(seed) => GenerationSimulator::with_seed(seed),
            None => GenerationSimulator::new(),
        };

        app.insert_resource(simulator)
            .add_event::<SimulationCommand>()
            .add_event::<GenerationEvent>()
            .add_event::<MothBorn>()
            .add_event::<MothEaten>()
            .add_event::<SimulationStopped>()
            .add_event::<CommandRejected>()
            .add_systems(
                Update,
                (apply_simulation_commands, advance_simulation).chain(),
            );
    }
}

/// System to apply queued control commands to the simulator
pub fn apply_simulation_commands(
    mut commands: EventReader<SimulationCommand>,
    mut simulator: ResMut<GenerationSimulator>,
    mut rejected: EventWriter<CommandRejected>,
    mut generations: EventWriter<GenerationEvent>,
    mut born: EventWriter<MothBorn>,
    mut eaten: EventWriter<MothEaten>,
    mut stopped: EventWriter<SimulationStopped>,
) {
    let mut events: Vec<SimulationEvent> = Vec::new();

    for command in commands.read() {
        let result = match command {
            SimulationCommand::Configure(config) => simulator.configure(*config),
            SimulationCommand::Repopulate => simulator.repopulate(),
            SimulationCommand::Start => simulator.start(&mut events),
            SimulationCommand::RequestStop => {
                simulator.request_stop();
                Ok(())
            }
            SimulationCommand::TogglePlay => {
                if simulator.is_running() {
                    simulator.request_stop();
                    Ok(())
                } else {
                    simulator.start(&mut events)
                }
            }
            SimulationCommand::Reset => {
                simulator.reset();
                Ok(())
            }
        };

        if let Err(error) = result {
            warn!("simulation command {:?} rejected: {}", command, error);
            rejected.send(CommandRejected {
                command: command.clone(),
                error,
            });
        }
    }

    forward_events(events, &mut generations, &mut born, &mut eaten, &mut stopped);
}

/// System to advance the simulator's scheduler by the frame's elapsed time
pub fn advance_simulation(
    time: Res<Time>,
    mut simulator: ResMut<GenerationSimulator>,
    mut generations: EventWriter<GenerationEvent>,
    mut born: EventWriter<MothBorn>,
    mut eaten: EventWriter<MothEaten>,
    mut stopped: EventWriter<SimulationStopped>,
) {
    let mut events: Vec<SimulationEvent> = Vec::new();
    if let Err(error) = simulator.tick(time.delta(), &mut events) {
        error!("generation step failed: {}", error);
    }
    forward_events(events, &mut generations, &mut born, &mut eaten, &mut stopped);
}

fn forward_events(
    events: Vec<SimulationEvent>,
    generations: &mut EventWriter<GenerationEvent>,
    born: &mut EventWriter<MothBorn>,
    eaten: &mut EventWriter<MothEaten>,
    stopped: &mut EventWriter<SimulationStopped>,
) {
    for event in events {
        match event {
            SimulationEvent::Generation { snapshot, predation } => {
                generations.send(GenerationEvent { snapshot, predation });
            }
            SimulationEvent::MothBorn(moth) => {
                born.send(MothBorn(moth));
            }
            SimulationEvent::MothEaten(moth) => {
                eaten.send(MothEaten(moth));
            }
            SimulationEvent::Stopped { snapshot, reason } => {
                stopped.send(SimulationStopped { snapshot, reason });
            }
        }
    }
}
