use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};
use peppered_moths::config::*;
use peppered_moths::plugin::{
    CommandRejected, GenerationEvent, MothSimulationPlugin, SimulationCommand, SimulationStopped,
};
use peppered_moths::{BarkMode, GenerationSimulator, Predation, SimulationConfig, StopReason};

/// Settings edited in the control panel and the latest report from the simulator
#[derive(Resource, Default)]
struct ControlPanel {
    config: SimulationConfig,
    last_predation: Option<Predation>,
    status: String,
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Peppered Moth Simulator".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .add_plugins(MothSimulationPlugin::default())
        .init_resource::<ControlPanel>()
        .add_systems(Startup, setup_camera)
        .add_systems(Update, (track_simulation, ui_system).chain())
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// System to fold simulator events into the control panel's status line
fn track_simulation(
    mut generations: EventReader<GenerationEvent>,
    mut stopped: EventReader<SimulationStopped>,
    mut rejected: EventReader<CommandRejected>,
    mut panel: ResMut<ControlPanel>,
) {
    for event in generations.read() {
        panel.last_predation = Some(event.predation);
    }
    for event in stopped.read() {
        panel.status = match event.reason {
            StopReason::Requested => format!("Paused at generation {}", event.snapshot.time_index),
            StopReason::HorizonReached => "Timeline complete; restart to run again".to_string(),
        };
        info!(
            "run halted: {} light / {} dark of {}",
            event.snapshot.light_count, event.snapshot.dark_count, event.snapshot.total_count
        );
    }
    for event in rejected.read() {
        panel.status = event.error.to_string();
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    simulator: Res<GenerationSimulator>,
    mut panel: ResMut<ControlPanel>,
    mut commands: EventWriter<SimulationCommand>,
) {
    let running = simulator.is_running();
    let snapshot = simulator.snapshot();

    egui::Window::new("Peppered Moths")
        .default_pos(egui::pos2(10.0, 10.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Settings");
            ui.separator();

            let before = panel.config;
            ui.add_enabled_ui(!running, |ui| {
                let config = &mut panel.config;
                ui.add(
                    egui::Slider::new(&mut config.population_size, MIN_POPULATION_SIZE..=1000)
                        .step_by(POPULATION_STEP as f64)
                        .text("Moths"),
                );
                ui.add(
                    egui::Slider::new(&mut config.initial_dark_percent, 0..=MAX_DARK_PERCENT)
                        .text("Initial dark %"),
                );
                ui.add(
                    egui::Slider::new(&mut config.predator_voracity, 0..=MAX_VORACITY)
                        .text("Predator voracity"),
                );
                ui.horizontal(|ui| {
                    ui.label("Bark:");
                    ui.radio_value(&mut config.bark_mode, BarkMode::Dynamic, "Dynamic");
                    ui.radio_value(&mut config.bark_mode, BarkMode::Clean, "Clean");
                    ui.radio_value(&mut config.bark_mode, BarkMode::Sooty, "Sooty");
                });
            });
            // Any settings change discards the current run.
            if panel.config != before {
                panel.last_predation = None;
                panel.status.clear();
                commands.send(SimulationCommand::Reset);
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!running, egui::Button::new("🦋 Populate"))
                    .clicked()
                {
                    panel.last_predation = None;
                    panel.status.clear();
                    commands.send(SimulationCommand::Configure(panel.config));
                }

                let play_text = if running { "⏸ Pause" } else { "▶ Play" };
                let can_play = running || !simulator.population().is_empty();
                if ui
                    .add_enabled(can_play, egui::Button::new(play_text))
                    .clicked()
                {
                    panel.status.clear();
                    commands.send(SimulationCommand::TogglePlay);
                }

                if ui
                    .add_enabled(!running, egui::Button::new("⟲ Restart"))
                    .clicked()
                {
                    panel.last_predation = None;
                    panel.status.clear();
                    commands.send(SimulationCommand::Reset);
                }
            });

            let state_text = if running {
                if simulator.stop_requested() { "Stopping" } else { "Running" }
            } else {
                "Idle"
            };
            ui.label(format!("State: {}", state_text));
            if !panel.status.is_empty() {
                ui.colored_label(egui::Color32::from_rgb(255, 200, 80), panel.status.as_str());
            }

            ui.separator();
            ui.heading("Population");
            ui.separator();

            if simulator.population().is_empty() {
                ui.label("Light: ");
                ui.label("Dark: ");
                ui.label("Total: ");
            } else {
                ui.label(format!("Light: {}", snapshot.light_count));
                ui.label(format!("Dark: {}", snapshot.dark_count));
                ui.label(format!("Total: {}", snapshot.total_count));
                ui.add(
                    egui::ProgressBar::new(snapshot.dark_fraction() as f32)
                        .text(format!("{:.0}% dark", snapshot.dark_fraction() * 100.0)),
                );
            }
            if let Some(predation) = panel.last_predation {
                ui.label(format!(
                    "Last generation: {} light eaten, {} dark eaten",
                    predation.light_eaten, predation.dark_eaten
                ));
            }

            ui.separator();
            ui.heading("Timeline");
            ui.separator();

            ui.add(
                egui::ProgressBar::new(snapshot.time_index as f32 / TIMELINE_LENGTH as f32)
                    .text(format!("Generation {} / {}", snapshot.time_index, TIMELINE_LENGTH)),
            );
            ui.label(format!("Sootiness: {:.2}", snapshot.sootiness));

            // Clean bark is drawn over sooty bark with the snapshot's opacities.
            let (rect, _response) =
                ui.allocate_exact_size(egui::vec2(ui.available_width(), 40.0), egui::Sense::hover());
            let dark_alpha = (snapshot.dark_bark_opacity() * 255.0) as u8;
            let light_alpha = (snapshot.light_bark_opacity() * 255.0) as u8;
            ui.painter().rect_filled(
                rect,
                egui::Rounding::same(2.0),
                egui::Color32::from_rgba_unmultiplied(45, 40, 35, dark_alpha),
            );
            ui.painter().rect_filled(
                rect,
                egui::Rounding::same(2.0),
                egui::Color32::from_rgba_unmultiplied(200, 195, 180, light_alpha),
            );
        });
}
