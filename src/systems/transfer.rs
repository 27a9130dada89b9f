//! スロットへの搬送タスク
//!
//! 開始時刻・始点終点・所要時間を持つ明示的な状態を外部システムが
//! 1フレームずつ進める。完了時に対象スロットの子として着地する。

use crate::constants::*;
use bevy::prelude::*;

/// 進行中の搬送タスク
/// 付与されたアイテムは親を持たず、ワールド座標で補間される
#[derive(Component)]
pub struct TransferAnimation {
    pub start_pos: Vec2,
    pub end_pos: Vec2,
    pub start_rot: Quat,
    pub end_rot: Quat,
    pub timer: Timer,
    /// 着地先スロット
    pub land_slot: Entity,
    /// 着地先での1枚ごとの積み上げオフセット
    pub land_step: f32,
}

impl TransferAnimation {
    pub fn new(
        start_pos: Vec2,
        end_pos: Vec2,
        start_rot: Quat,
        end_rot: Quat,
        duration_secs: f32,
        land_slot: Entity,
        land_step: f32,
    ) -> Self {
        Self {
            start_pos,
            end_pos,
            start_rot,
            end_rot,
            timer: Timer::from_seconds(duration_secs, TimerMode::Once),
            land_slot,
            land_step,
        }
    }
}

/// 位置を目標へ向けて最大距離だけ近づける
pub fn step_towards(current: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let to = target - current;
    let dist = to.length();
    if dist <= max_step || dist <= f32::EPSILON {
        target
    } else {
        current + to / dist * max_step
    }
}

/// 回転を目標へ向けて最大角速度で近づける
pub fn rotate_towards(current: Quat, target: Quat, max_radians: f32) -> Quat {
    let angle = current.angle_between(target);
    if angle <= max_radians || angle <= f32::EPSILON {
        target
    } else {
        current.slerp(target, max_radians / angle)
    }
}

/// 全搬送タスクを1フレーム進め、完了したものをスロットへ着地させる
pub fn advance_transfers_system(
    time: Res<Time>,
    mut commands: Commands,
    mut q_transfers: Query<(Entity, &mut Transform, &mut TransferAnimation)>,
    q_children: Query<&Children>,
) {
    for (item, mut transform, mut transfer) in q_transfers.iter_mut() {
        transfer.timer.tick(time.delta());
        let t = transfer.timer.fraction();
        let pos = transfer.start_pos.lerp(transfer.end_pos, t);
        transform.translation = pos.extend(Z_FLYING);
        transform.rotation = transfer.start_rot.slerp(transfer.end_rot, t);

        if !transfer.timer.finished() {
            continue;
        }

        // 着地: スロットの子になり、現在の積み枚数ぶんオフセットする
        let index = q_children
            .get(transfer.land_slot)
            .map(|children| children.len())
            .unwrap_or(0);
        transform.translation = Vec3::new(
            0.0,
            index as f32 * transfer.land_step,
            Z_ITEM + index as f32 * Z_ITEM_STEP,
        );
        transform.rotation = transfer.end_rot;
        commands
            .entity(item)
            .insert(ChildOf(transfer.land_slot))
            .remove::<TransferAnimation>();
    }
}
