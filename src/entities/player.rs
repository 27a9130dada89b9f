//! プレイヤーキャラクターのポインタ移動

use crate::constants::*;
use crate::entities::camera::MainCamera;
use crate::systems::collector::CollectTask;
use crate::systems::transfer::rotate_towards;
use crate::world::map::OfficeMap;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// 移動の動作設定
#[derive(Debug, Clone)]
pub struct MovementConfig {
    pub move_speed: f32,
    pub turn_speed: f32,
    pub stop_epsilon: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            turn_speed: TURN_SPEED,
            stop_epsilon: STOP_EPSILON,
        }
    }
}

/// 操作対象のプレイヤー
#[derive(Component)]
pub struct Player {
    pub config: MovementConfig,
}

/// 手元の紙スタックのアンカー（プレイヤーの子エンティティ）
#[derive(Component)]
pub struct CarryAnchor;

/// 移動アニメーション状態
/// ビジュアル層が毎フレーム参照する
#[derive(Component, Default)]
pub struct AnimationState {
    pub is_moving: bool,
    pub facing_right: bool,
}

/// ポインタ入力を地面の目標点へ変換し、プレイヤーを近づける
/// 回収タスクの進行中は移動入力を受け付けない
pub fn player_movement_system(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    office_map: Res<OfficeMap>,
    q_windows: Query<&Window, With<PrimaryWindow>>,
    q_cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    q_collect_tasks: Query<(), With<CollectTask>>,
    mut q_players: Query<(&mut Transform, &mut AnimationState, &Player)>,
) {
    let Ok((mut transform, mut anim, player)) = q_players.single_mut() else {
        return;
    };
    if !q_collect_tasks.is_empty() {
        anim.is_moving = false;
        return;
    }

    let Ok(window) = q_windows.single() else {
        return;
    };
    let Ok((camera, camera_tf)) = q_cameras.single() else {
        return;
    };
    let Some(viewport_pos) = pointer_position(&buttons, &touches, window) else {
        anim.is_moving = false;
        return;
    };
    let Ok(world_pos) = camera.viewport_to_world_2d(camera_tf, viewport_pos) else {
        return;
    };
    if !office_map.is_walkable_world(world_pos) {
        anim.is_moving = false;
        return;
    }

    move_and_rotate(
        &mut transform,
        &mut anim,
        &player.config,
        &office_map,
        world_pos,
        time.delta_secs(),
    );
}

/// マウス優先でポインタのビューポート座標を返す
fn pointer_position(
    buttons: &ButtonInput<MouseButton>,
    touches: &Touches,
    window: &Window,
) -> Option<Vec2> {
    if buttons.pressed(MouseButton::Left) {
        if let Some(pos) = window.cursor_position() {
            return Some(pos);
        }
    }
    touches.iter().next().map(|touch| touch.position())
}

/// 目標地点へ向けた回頭と前進
/// 直線経路が遮られている場合は動かない
pub fn move_and_rotate(
    transform: &mut Transform,
    anim: &mut AnimationState,
    config: &MovementConfig,
    map: &OfficeMap,
    target: Vec2,
    dt: f32,
) -> bool {
    let pos = transform.translation.truncate();
    let to = target - pos;
    let distance = to.length();
    if distance <= config.stop_epsilon {
        anim.is_moving = false;
        return false;
    }
    if !map.is_path_clear(pos, target) {
        anim.is_moving = false;
        return false;
    }

    let direction = to / distance;
    let heading = Quat::from_rotation_z(direction.y.atan2(direction.x));
    transform.rotation = rotate_towards(transform.rotation, heading, config.turn_speed * dt);

    let step = (config.move_speed * dt).min(distance);
    let next = pos + direction * step;
    transform.translation.x = next.x;
    transform.translation.y = next.y;

    anim.is_moving = true;
    if direction.x.abs() > 0.1 {
        anim.facing_right = direction.x > 0.0;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walkable_start() -> Transform {
        Transform::from_translation(OfficeMap::grid_to_world(2, 2).extend(Z_CHARACTER))
    }

    #[test]
    fn walks_to_target_within_epsilon() {
        let map = OfficeMap::default();
        let config = MovementConfig::default();
        let mut transform = walkable_start();
        let mut anim = AnimationState::default();
        let target = OfficeMap::grid_to_world(8, 2);

        let mut steps = 0;
        while move_and_rotate(&mut transform, &mut anim, &config, &map, target, 0.05) {
            steps += 1;
            assert!(steps < 100, "never reached the target");
        }
        assert!(transform.translation.truncate().distance(target) <= config.stop_epsilon);
        assert!(!anim.is_moving);
        assert!(anim.facing_right);
    }

    #[test]
    fn obstructed_path_stops_movement() {
        let mut map = OfficeMap::default();
        map.set_blocked(5, 2, true);
        let config = MovementConfig::default();
        let mut transform = walkable_start();
        let mut anim = AnimationState::default();
        let start = transform.translation;
        let target = OfficeMap::grid_to_world(8, 2);

        assert!(!move_and_rotate(&mut transform, &mut anim, &config, &map, target, 0.05));
        assert_eq!(transform.translation, start);
        assert!(!anim.is_moving);
    }

    #[test]
    fn heading_turns_toward_direction_of_travel() {
        let map = OfficeMap::default();
        let config = MovementConfig::default();
        let mut transform = walkable_start();
        let mut anim = AnimationState::default();
        let target = transform.translation.truncate() + Vec2::new(0.0, 100.0);

        for _ in 0..40 {
            move_and_rotate(&mut transform, &mut anim, &config, &map, target, 0.05);
        }
        let up = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        assert!(transform.rotation.angle_between(up) < 1e-3);
    }
}
