//! アニメーション状態の見た目への反映

use crate::constants::*;
use crate::entities::player::{AnimationState, Player};
use bevy::prelude::*;

/// 歩行中はスプライトを脈動させ、進行方向に応じて左右を反転する
pub fn player_animation_system(
    time: Res<Time>,
    mut q_players: Query<(&AnimationState, &mut Sprite), With<Player>>,
) {
    for (anim, mut sprite) in q_players.iter_mut() {
        sprite.flip_x = !anim.facing_right;
        if anim.is_moving {
            let pulse = (time.elapsed_secs() * 12.0).sin() * 1.5;
            sprite.custom_size = Some(PLAYER_SIZE + Vec2::splat(pulse));
        } else {
            sprite.custom_size = Some(PLAYER_SIZE);
        }
    }
}
