mod assets;
mod constants;
mod entities;
mod events;
mod plugins;
mod systems;
mod world;

use bevy::prelude::*;

use crate::events::PapersCollected;
use crate::plugins::{InputPlugin, LogicPlugin, StartupPlugin, VisualPlugin};
use crate::systems::GameSystemSet;

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.1, 0.1, 0.12)))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Paper Office".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=error".to_string(),
                    ..default()
                }),
        )
        .add_message::<PapersCollected>()
        .configure_sets(
            Update,
            (
                GameSystemSet::Input,
                GameSystemSet::Logic.run_if(|time: Res<Time<Virtual>>| !time.is_paused()),
                GameSystemSet::Actor.run_if(|time: Res<Time<Virtual>>| !time.is_paused()),
                GameSystemSet::Visual,
            )
                .chain(),
        )
        .add_plugins(StartupPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(LogicPlugin)
        .add_plugins(VisualPlugin)
        .run();
}
