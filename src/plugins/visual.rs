//! ビジュアル同期のプラグイン

use crate::entities::camera::camera_follow_system;
use crate::systems::GameSystemSet;
use crate::systems::visual::player_animation_system;
use bevy::prelude::*;

pub struct VisualPlugin;

impl Plugin for VisualPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            player_animation_system.in_set(GameSystemSet::Visual),
        )
        .add_systems(PostUpdate, camera_follow_system);
    }
}
