//! プレイヤー追従カメラ

use crate::entities::player::Player;
use bevy::prelude::*;

/// メインカメラのマーカー
#[derive(Component)]
pub struct MainCamera;

/// 追従カメラの設定
#[derive(Component)]
pub struct FollowCamera {
    pub offset: Vec2,
    /// 毎フレームの補間係数
    pub smooth: f32,
}

/// Transform書き込みの後（PostUpdate）にプレイヤーへ滑らかに追従する
pub fn camera_follow_system(
    q_players: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cameras: Query<(&mut Transform, &FollowCamera), With<MainCamera>>,
) {
    let Ok(player_tf) = q_players.single() else {
        return;
    };
    for (mut camera_tf, follow) in q_cameras.iter_mut() {
        let desired = player_tf.translation.truncate() + follow.offset;
        let smoothed = camera_tf.translation.truncate().lerp(desired, follow.smooth);
        camera_tf.translation.x = smoothed.x;
        camera_tf.translation.y = smoothed.y;
    }
}
