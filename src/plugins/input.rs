//! 入力関連のプラグイン

use crate::systems::GameSystemSet;
use bevy::prelude::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            pause_toggle_system.in_set(GameSystemSet::Input),
        );
    }
}

/// スペースキーで一時停止、数字キーでゲーム速度を切り替える
pub fn pause_toggle_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut time: ResMut<Time<Virtual>>,
) {
    if keys.just_pressed(KeyCode::Space) {
        if time.is_paused() {
            time.unpause();
            info!("INPUT: resumed");
        } else {
            time.pause();
            info!("INPUT: paused");
        }
    }

    if keys.just_pressed(KeyCode::Digit1) {
        time.unpause();
        time.set_relative_speed(1.0);
    }
    if keys.just_pressed(KeyCode::Digit2) {
        time.unpause();
        time.set_relative_speed(2.0);
    }
}
